// SPDX-License-Identifier: MPL-2.0
//! Looping video decoder.
//!
//! Frames are scaled to RGBA and paced against their timestamps. At the end
//! of the clip the demuxer is rewound and decoding starts over. The audio
//! track is never opened, so videos always play muted.

use super::{check_locator, pts_to_secs, Pacer, PlayerCommand};
use crate::error::{Error, Result};
use crate::gallery::thumbnail::init_ffmpeg;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// A decoded frame ready for display.
#[derive(Clone)]
pub struct DecodedFrame {
    /// RGBA pixels, row after row without padding.
    pub rgba_data: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    pub pts_secs: f64,
}

impl std::fmt::Debug for DecodedFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pts_secs", &self.pts_secs)
            .finish_non_exhaustive()
    }
}

impl DecodedFrame {
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.rgba_data.len()
    }
}

#[derive(Debug, Clone)]
pub enum DecoderEvent {
    FrameReady(DecodedFrame),
    /// The clip ended and decoding restarted from the beginning.
    Rewound,
    Error(String),
}

/// Video decoder running on the blocking pool.
pub struct VideoDecoder {
    command_tx: mpsc::UnboundedSender<PlayerCommand>,
    /// Bounded so decoding stays at most two frames ahead of the UI.
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl VideoDecoder {
    /// Spawns a decoder for the video at `locator`, a path or URL.
    ///
    /// The decoder waits for [`PlayerCommand::Play`] before producing frames.
    ///
    /// # Errors
    ///
    /// Returns an error if `locator` is a local path that does not exist.
    pub fn new(locator: impl Into<String>) -> Result<Self> {
        let locator = locator.into();
        check_locator(&locator)?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(2);

        tokio::task::spawn_blocking(move || {
            let error_tx = event_tx.clone();
            if let Err(e) = Self::decoder_loop(&locator, command_rx, event_tx) {
                tracing::warn!(location = %locator, error = %e, "video decoder stopped");
                let _ = error_tx.blocking_send(DecoderEvent::Error(e.to_string()));
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
            .map_err(|_| Error::Playback("video decoder is not running".into()))
    }

    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }

    fn decoder_loop(
        locator: &str,
        mut command_rx: mpsc::UnboundedReceiver<PlayerCommand>,
        event_tx: mpsc::Sender<DecoderEvent>,
    ) -> Result<()> {
        init_ffmpeg()?;

        let mut ictx = ffmpeg_next::format::input(&locator)
            .map_err(|e| Error::Playback(format!("failed to open video: {e}")))?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| Error::Playback("no video stream found".to_string()))?;
        let video_stream_index = input.index();
        let time_base = input.time_base();

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| Error::Playback(format!("failed to create codec context: {e}")))?;
        let mut decoder = context_decoder
            .decoder()
            .video()
            .map_err(|e| Error::Playback(format!("failed to create video decoder: {e}")))?;

        let width = decoder.width();
        let height = decoder.height();

        let mut scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| Error::Playback(format!("failed to create scaler: {e}")))?;

        let mut is_playing = false;
        let mut pacer = Pacer::default();
        let mut frames_this_pass: u64 = 0;

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

            let mut frame_decoded = false;
            for (stream, packet) in ictx.packets() {
                if stream.index() != video_stream_index {
                    continue;
                }

                if let Err(e) = decoder.send_packet(&packet) {
                    tracing::debug!(error = %e, "skipping undecodable packet");
                    continue;
                }

                let mut decoded_frame = ffmpeg_next::frame::Video::empty();
                if decoder.receive_frame(&mut decoded_frame).is_ok() {
                    let mut rgb_frame = ffmpeg_next::frame::Video::empty();
                    if let Err(e) = scaler.run(&decoded_frame, &mut rgb_frame) {
                        tracing::debug!(error = %e, "skipping unscalable frame");
                        continue;
                    }

                    let pts_secs = pts_to_secs(decoded_frame.timestamp(), time_base);
                    if let Some(wait) = pacer.delay(pts_secs, 0.0, Instant::now()) {
                        std::thread::sleep(wait);
                    }

                    let decoded = DecodedFrame {
                        rgba_data: Arc::new(extract_rgba_data(&rgb_frame)),
                        width,
                        height,
                        pts_secs,
                    };

                    if event_tx
                        .blocking_send(DecoderEvent::FrameReady(decoded))
                        .is_err()
                    {
                        return Ok(());
                    }

                    frame_decoded = true;
                    break;
                }
            }

            if frame_decoded {
                frames_this_pass += 1;
                continue;
            }

            // End of the clip
            if frames_this_pass == 0 {
                return Err(Error::Playback("video has no decodable frames".into()));
            }
            ictx.seek(0, ..0)
                .map_err(|e| Error::Playback(format!("rewind failed: {e}")))?;
            decoder.flush();
            pacer.start(Instant::now());
            frames_this_pass = 0;

            if event_tx.blocking_send(DecoderEvent::Rewound).is_err() {
                break;
            }
        }

        Ok(())
    }
}

/// Copies the visible pixels of an RGBA frame, dropping row padding.
fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
    copy_rows(frame.data(0), frame.stride(0), frame.width(), frame.height())
}

fn copy_rows(data: &[u8], stride: usize, width: u32, height: u32) -> Vec<u8> {
    let row_len = width as usize * 4;
    let mut rgba_bytes = Vec::with_capacity(row_len * height as usize);
    for row in data.chunks(stride.max(1)).take(height as usize) {
        if let Some(pixels) = row.get(..row_len) {
            rgba_bytes.extend_from_slice(pixels);
        }
    }
    rgba_bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn decoder_fails_for_nonexistent_file() {
        let result = VideoDecoder::new("/nonexistent/video.mp4");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn garbage_file_reports_error() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let video_path = temp_dir.path().join("artwork.mp4");
        std::fs::write(&video_path, b"fake video data").expect("write video");

        let mut decoder =
            VideoDecoder::new(video_path.to_string_lossy()).expect("decoder should spawn");
        // The task may already have failed and dropped its receiver
        let _ = decoder.send_command(PlayerCommand::Play);

        let event = tokio::time::timeout(Duration::from_secs(5), decoder.recv_event())
            .await
            .expect("decoder should answer");
        assert!(matches!(event, Some(DecoderEvent::Error(_))));
    }

    #[test]
    fn padded_rows_are_trimmed() {
        // 1x2 image, stride of 8 bytes per row
        let data = [1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8, 0, 0, 0, 0];
        assert_eq!(copy_rows(&data, 8, 1, 2), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn decoded_frame_calculates_size() {
        let frame = DecodedFrame {
            rgba_data: Arc::new(vec![0u8; 640 * 360 * 4]),
            width: 640,
            height: 360,
            pts_secs: 0.0,
        };
        assert_eq!(frame.size_bytes(), 640 * 360 * 4);
        assert!(format!("{frame:?}").contains("640"));
    }
}
