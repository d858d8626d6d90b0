// SPDX-License-Identifier: MPL-2.0
//! Looping audio decoder for audio submissions.
//!
//! Samples are resampled to the output device format (f32, interleaved) and
//! handed out slightly ahead of their presentation time so the device buffer
//! never runs dry. At the end of the track decoding starts over.

use super::audio_output::{AudioOutputConfig, AudioSamples};
use super::{check_locator, pts_to_secs, Pacer, PlayerCommand};
use crate::error::{Error, Result};
use crate::gallery::thumbnail::init_ffmpeg;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// How far ahead of playback decoded audio is queued, in seconds.
const AUDIO_LOOKAHEAD_SECS: f64 = 0.2;

#[derive(Debug, Clone)]
pub enum AudioDecoderEvent {
    BufferReady(AudioSamples),
    /// The track ended and decoding restarted from the beginning.
    Rewound,
    Error(String),
}

/// Audio decoder running on the blocking pool.
pub struct AudioDecoder {
    command_tx: mpsc::UnboundedSender<PlayerCommand>,
    event_rx: mpsc::Receiver<AudioDecoderEvent>,
}

impl AudioDecoder {
    /// Spawns a decoder for the audio at `locator`, resampling to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if `locator` is a local path that does not exist.
    pub fn new(locator: impl Into<String>, output: AudioOutputConfig) -> Result<Self> {
        let locator = locator.into();
        check_locator(&locator)?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(4);

        tokio::task::spawn_blocking(move || {
            let error_tx = event_tx.clone();
            if let Err(e) = Self::decoder_loop(&locator, command_rx, event_tx, output) {
                tracing::warn!(location = %locator, error = %e, "audio decoder stopped");
                let _ = error_tx.blocking_send(AudioDecoderEvent::Error(e.to_string()));
            }
        });

        Ok(Self {
            command_tx,
            event_rx,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the decoder task is no longer running.
    pub fn send_command(&self, command: PlayerCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Playback("audio decoder is not running".into()))
    }

    pub async fn recv_event(&mut self) -> Option<AudioDecoderEvent> {
        self.event_rx.recv().await
    }

    fn decoder_loop(
        locator: &str,
        mut command_rx: mpsc::UnboundedReceiver<PlayerCommand>,
        event_tx: mpsc::Sender<AudioDecoderEvent>,
        output: AudioOutputConfig,
    ) -> Result<()> {
        init_ffmpeg()?;

        let mut ictx = ffmpeg_next::format::input(&locator)
            .map_err(|e| Error::Playback(format!("failed to open audio: {e}")))?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Audio)
            .ok_or_else(|| Error::Playback("no audio stream found".to_string()))?;
        let audio_stream_index = input.index();
        let time_base = input.time_base();

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| Error::Playback(format!("failed to create codec context: {e}")))?;
        let mut decoder = context_decoder
            .decoder()
            .audio()
            .map_err(|e| Error::Playback(format!("failed to create audio decoder: {e}")))?;

        // Anything beyond two channels is downmixed to stereo
        let output_channel_layout = match output.channels {
            1 => ffmpeg_next::ChannelLayout::MONO,
            _ => ffmpeg_next::ChannelLayout::STEREO,
        };
        let output_channels = if output.channels == 1 { 1 } else { 2 };

        let mut resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
            output_channel_layout,
            output.sample_rate,
        )
        .map_err(|e| Error::Playback(format!("failed to create resampler: {e}")))?;

        let mut is_playing = false;
        let mut pacer = Pacer::default();
        let mut buffers_this_pass: u64 = 0;

        loop {
            match command_rx.try_recv() {
                Ok(PlayerCommand::Play) => {
                    is_playing = true;
                    pacer.start(Instant::now());
                }
                Ok(PlayerCommand::Pause) => {
                    is_playing = false;
                    pacer.stop();
                }
                Ok(PlayerCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => break,
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            if !is_playing {
                std::thread::sleep(Duration::from_millis(10));
                continue;
            }

            let mut buffer_decoded = false;
            for (stream, packet) in ictx.packets() {
                if stream.index() != audio_stream_index {
                    continue;
                }

                if let Err(e) = decoder.send_packet(&packet) {
                    tracing::debug!(error = %e, "skipping undecodable audio packet");
                    continue;
                }

                let mut decoded_frame = ffmpeg_next::frame::Audio::empty();
                if decoder.receive_frame(&mut decoded_frame).is_ok() {
                    let mut resampled = ffmpeg_next::frame::Audio::empty();
                    if let Err(e) = resampler.run(&decoded_frame, &mut resampled) {
                        tracing::debug!(error = %e, "skipping unresamplable audio");
                        continue;
                    }

                    let count = resampled.samples() * output_channels;
                    let samples = extract_samples(resampled.data(0), count);

                    let pts_secs = pts_to_secs(decoded_frame.timestamp(), time_base);
                    let now = Instant::now();
                    if let Some(wait) = pacer.delay(pts_secs, AUDIO_LOOKAHEAD_SECS, now) {
                        std::thread::sleep(wait);
                    }

                    if event_tx
                        .blocking_send(AudioDecoderEvent::BufferReady(Arc::new(samples)))
                        .is_err()
                    {
                        return Ok(());
                    }

                    buffer_decoded = true;
                    break;
                }
            }

            if buffer_decoded {
                buffers_this_pass += 1;
                continue;
            }

            // End of the track
            if buffers_this_pass == 0 {
                return Err(Error::Playback("audio has no decodable samples".into()));
            }
            ictx.seek(0, ..0)
                .map_err(|e| Error::Playback(format!("rewind failed: {e}")))?;
            decoder.flush();
            pacer.start(Instant::now());
            buffers_this_pass = 0;

            if event_tx.blocking_send(AudioDecoderEvent::Rewound).is_err() {
                break;
            }
        }

        Ok(())
    }
}

/// Reads `count` little-endian f32 samples from packed audio bytes.
fn extract_samples(data: &[u8], count: usize) -> Vec<f32> {
    data.chunks_exact(4)
        .take(count)
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEREO_48K: AudioOutputConfig = AudioOutputConfig {
        sample_rate: 48_000,
        channels: 2,
    };

    #[tokio::test]
    async fn decoder_fails_for_nonexistent_file() {
        assert!(AudioDecoder::new("/nonexistent/artwork.mp3", STEREO_48K).is_err());
    }

    #[tokio::test]
    async fn garbage_file_reports_error() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("artwork.mp3");
        std::fs::write(&path, b"not really audio").expect("write audio");

        let mut decoder =
            AudioDecoder::new(path.to_string_lossy(), STEREO_48K).expect("decoder should spawn");
        let _ = decoder.send_command(PlayerCommand::Play);

        let event = tokio::time::timeout(Duration::from_secs(5), decoder.recv_event())
            .await
            .expect("decoder should answer");
        assert!(matches!(event, Some(AudioDecoderEvent::Error(_))));
    }

    #[test]
    fn samples_are_read_little_endian() {
        let mut bytes = Vec::new();
        for value in [0.5f32, -0.25, 1.0] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        assert_eq!(extract_samples(&bytes, 3), vec![0.5, -0.25, 1.0]);
        assert_eq!(extract_samples(&bytes, 2), vec![0.5, -0.25]);
    }

    #[test]
    fn trailing_partial_sample_is_ignored() {
        let mut bytes = 0.75f32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0, 1]);
        assert_eq!(extract_samples(&bytes, 4), vec![0.75]);
    }
}
