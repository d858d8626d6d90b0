// SPDX-License-Identifier: MPL-2.0
//! Iced subscription driving one playback session.
//!
//! The subscription owns the decoder (and, for audio, the output device),
//! starts playback right away, and forwards commands from the sheet. It
//! stays alive until the app drops the player, which removes it from the
//! subscription set and closes every channel.

use super::audio::{AudioDecoder, AudioDecoderEvent};
use super::audio_output::AudioOutput;
use super::decoder::{DecodedFrame, DecoderEvent, VideoDecoder};
use super::{PlayerCommand, StreamKind, DEFAULT_VOLUME};
use crate::error::{Error, Result};
use iced::futures::SinkExt;
use iced::stream;
use tokio::sync::mpsc;

/// Subscription ID; one per overlay session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackId(u64);

/// Cloneable handle for sending commands to a running session.
#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<PlayerCommand>,
}

impl CommandSender {
    pub(crate) fn new(tx: mpsc::UnboundedSender<PlayerCommand>) -> Self {
        Self { tx }
    }

    /// # Errors
    ///
    /// Returns an error if the session has ended.
    pub fn send(&self, command: PlayerCommand) -> Result<()> {
        self.tx
            .send(command)
            .map_err(|_| Error::Playback("playback session has ended".into()))
    }
}

impl std::fmt::Debug for CommandSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSender")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum PlaybackEvent {
    /// Decoding started; commands can be sent through the sender.
    Started(CommandSender),
    FrameReady(DecodedFrame),
    Error(String),
}

/// An event tagged with the session that produced it.
#[derive(Debug, Clone)]
pub struct PlaybackMessage {
    pub session: u64,
    pub event: PlaybackEvent,
}

enum State {
    Idle,
    Video {
        decoder: VideoDecoder,
        command_rx: mpsc::UnboundedReceiver<PlayerCommand>,
    },
    Audio {
        decoder: AudioDecoder,
        audio_output: AudioOutput,
        command_rx: mpsc::UnboundedReceiver<PlayerCommand>,
    },
    Finished,
}

/// Starts playing `locator` and reports frames and failures for `session`.
pub fn playback(
    locator: String,
    kind: StreamKind,
    session: u64,
) -> iced::Subscription<PlaybackMessage> {
    iced::Subscription::run_with_id(
        PlaybackId(session),
        stream::channel(100, move |mut output| async move {
            let message = |event| PlaybackMessage { session, event };
            let mut state = State::Idle;

            loop {
                match &mut state {
                    State::Idle => {
                        let (command_tx, command_rx) = mpsc::unbounded_channel();

                        let started = match kind {
                            StreamKind::Video => start_video(&locator, command_rx),
                            StreamKind::Audio => start_audio(&locator, command_rx),
                        };

                        let (event, next) = match started {
                            Ok(next) => (PlaybackEvent::Started(CommandSender::new(command_tx)), next),
                            Err(e) => (PlaybackEvent::Error(e.to_string()), State::Finished),
                        };
                        let _ = output.send(message(event)).await;
                        state = next;
                    }

                    State::Video {
                        decoder,
                        command_rx,
                    } => {
                        let mut finished = false;
                        tokio::select! {
                            cmd = command_rx.recv() => {
                                let command = cmd.unwrap_or(PlayerCommand::Stop);
                                let _ = decoder.send_command(command);
                                finished = command == PlayerCommand::Stop;
                            }
                            event = decoder.recv_event() => match event {
                                Some(DecoderEvent::FrameReady(frame)) => {
                                    let event = PlaybackEvent::FrameReady(frame);
                                    let _ = output.send(message(event)).await;
                                }
                                Some(DecoderEvent::Rewound) => {
                                    tracing::trace!(session, "video looped");
                                }
                                Some(DecoderEvent::Error(e)) => {
                                    let _ = output.send(message(PlaybackEvent::Error(e))).await;
                                    finished = true;
                                }
                                None => finished = true,
                            },
                        }
                        if finished {
                            state = State::Finished;
                        }
                    }

                    State::Audio {
                        decoder,
                        audio_output,
                        command_rx,
                    } => {
                        let mut finished = false;
                        tokio::select! {
                            cmd = command_rx.recv() => {
                                let command = cmd.unwrap_or(PlayerCommand::Stop);
                                let _ = match command {
                                    PlayerCommand::Play => audio_output.resume(),
                                    PlayerCommand::Pause => audio_output.pause(),
                                    PlayerCommand::Stop => audio_output.stop(),
                                };
                                let _ = decoder.send_command(command);
                                finished = command == PlayerCommand::Stop;
                            }
                            event = decoder.recv_event() => match event {
                                Some(AudioDecoderEvent::BufferReady(samples)) => {
                                    let _ = audio_output.play(samples);
                                }
                                Some(AudioDecoderEvent::Rewound) => {
                                    tracing::trace!(session, "audio looped");
                                }
                                Some(AudioDecoderEvent::Error(e)) => {
                                    let _ = audio_output.stop();
                                    let _ = output.send(message(PlaybackEvent::Error(e))).await;
                                    finished = true;
                                }
                                None => finished = true,
                            },
                        }
                        if finished {
                            state = State::Finished;
                        }
                    }

                    State::Finished => break,
                }
            }

            // Dropping the decoders closed their channels; idle until the
            // app drops the subscription.
            std::future::pending::<()>().await;
        }),
    )
}

fn start_video(
    locator: &str,
    command_rx: mpsc::UnboundedReceiver<PlayerCommand>,
) -> Result<State> {
    let decoder = VideoDecoder::new(locator)?;
    decoder.send_command(PlayerCommand::Play)?;
    Ok(State::Video {
        decoder,
        command_rx,
    })
}

fn start_audio(
    locator: &str,
    command_rx: mpsc::UnboundedReceiver<PlayerCommand>,
) -> Result<State> {
    let audio_output = AudioOutput::new(DEFAULT_VOLUME)?;
    let decoder = AudioDecoder::new(locator, audio_output.config())?;
    decoder.send_command(PlayerCommand::Play)?;
    Ok(State::Audio {
        decoder,
        audio_output,
        command_rx,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_get_distinct_ids() {
        assert_eq!(PlaybackId(1), PlaybackId(1));
        assert_ne!(PlaybackId(1), PlaybackId(2));
    }

    #[test]
    fn sender_reports_closed_session() {
        let (tx, rx) = mpsc::unbounded_channel();
        let sender = CommandSender::new(tx);
        assert!(sender.send(PlayerCommand::Pause).is_ok());

        drop(rx);
        assert!(sender.send(PlayerCommand::Play).is_err());
        assert!(format!("{sender:?}").contains("closed: true"));
    }

    #[tokio::test]
    async fn missing_video_fails_to_start() {
        let (_tx, rx) = mpsc::unbounded_channel();
        let started = start_video("/nonexistent/artwork.mp4", rx);
        assert!(matches!(started, Err(Error::Playback(_))));
    }

    #[test]
    fn playback_messages_clone_with_session() {
        let message = PlaybackMessage {
            session: 7,
            event: PlaybackEvent::Error("no video stream found".into()),
        };
        let copy = message.clone();
        assert_eq!(copy.session, 7);
        assert!(format!("{copy:?}").contains("no video stream found"));
    }
}
