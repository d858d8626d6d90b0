// SPDX-License-Identifier: MPL-2.0
//! Poster frames for videos that ship without an `artwork.jpg`.
//!
//! The frame is taken a little way into the clip so that fade-ins and black
//! leaders do not end up as the tile picture.

use crate::error::{Error, Result};
use std::future::Future;
use std::sync::Once;

/// Upper bound of the seek offset, in seconds.
pub const MAX_SEEK_SECS: f64 = 2.0;

/// Fraction of the duration used as seek offset for short clips.
pub const SEEK_FRACTION: f64 = 0.2;

/// JPEG quality of generated posters.
pub const JPEG_QUALITY: u8 = 90;

static FFMPEG_INIT: Once = Once::new();

/// Produces an encoded still picture for a video.
pub trait FrameGrabber: Send + Sync {
    /// Returns JPEG bytes for a frame of the video at `locator`.
    fn grab(&self, locator: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Frame grabber backed by FFmpeg, run on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegGrabber;

impl FrameGrabber for FfmpegGrabber {
    async fn grab(&self, locator: &str) -> Result<Vec<u8>> {
        let locator = locator.to_string();
        tokio::task::spawn_blocking(move || extract_poster(&locator))
            .await
            .map_err(|e| Error::Thumbnail(format!("frame task failed: {e}")))?
    }
}

/// Seek offset for a clip: `min(2 s, 20% of duration)`.
///
/// Unknown or non-positive durations seek nowhere.
#[must_use]
pub fn seek_position(duration_secs: f64) -> f64 {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return 0.0;
    }
    (duration_secs * SEEK_FRACTION).min(MAX_SEEK_SECS)
}

/// Initializes FFmpeg once and quiets its logging.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Thumbnail(format!("FFmpeg initialization failed: {e}")));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Decodes one frame of the video at `locator` and encodes it as JPEG.
pub fn extract_poster(locator: &str) -> Result<Vec<u8>> {
    init_ffmpeg()?;

    let mut ictx = ffmpeg_next::format::input(&locator)
        .map_err(|e| Error::Thumbnail(format!("failed to open {locator}: {e}")))?;

    let duration_secs = if ictx.duration() > 0 {
        ictx.duration() as f64 / f64::from(ffmpeg_next::ffi::AV_TIME_BASE)
    } else {
        0.0
    };

    let (stream_index, time_base, parameters) = {
        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| Error::Thumbnail("no video stream found".to_string()))?;
        (input.index(), input.time_base(), input.parameters())
    };

    let context = ffmpeg_next::codec::context::Context::from_parameters(parameters)
        .map_err(|e| Error::Thumbnail(format!("failed to create codec context: {e}")))?;
    let mut decoder = context
        .decoder()
        .video()
        .map_err(|e| Error::Thumbnail(format!("failed to create video decoder: {e}")))?;

    if decoder.width() == 0 || decoder.height() == 0 {
        return Err(Error::Thumbnail(format!(
            "invalid video dimensions: {}x{}",
            decoder.width(),
            decoder.height()
        )));
    }

    let target = seek_position(duration_secs);
    if target > 0.0 {
        // AV_TIME_BASE units; the range lets FFmpeg land on the previous keyframe
        #[allow(clippy::cast_possible_truncation)]
        let timestamp = (target * 1_000_000.0) as i64;
        if let Err(e) = ictx.seek(timestamp, ..timestamp) {
            tracing::debug!(locator, error = %e, "seek failed, decoding from start");
        }
    }

    let seconds_per_tick =
        f64::from(time_base.numerator()) / f64::from(time_base.denominator().max(1));

    let mut decoded = ffmpeg_next::frame::Video::empty();
    let mut chosen: Option<ffmpeg_next::frame::Video> = None;

    'packets: for (stream, packet) in ictx.packets() {
        if stream.index() != stream_index {
            continue;
        }
        if decoder.send_packet(&packet).is_err() {
            continue;
        }
        while decoder.receive_frame(&mut decoded).is_ok() {
            let reached = decoded
                .timestamp()
                .is_none_or(|pts| pts as f64 * seconds_per_tick + 1e-3 >= target);
            chosen = Some(std::mem::replace(
                &mut decoded,
                ffmpeg_next::frame::Video::empty(),
            ));
            if reached {
                break 'packets;
            }
        }
    }

    if chosen.is_none() && decoder.send_eof().is_ok() && decoder.receive_frame(&mut decoded).is_ok()
    {
        chosen = Some(decoded);
    }

    let frame = chosen.ok_or_else(|| Error::Thumbnail("could not decode a frame".to_string()))?;

    let mut scaler = ffmpeg_next::software::scaling::Context::get(
        frame.format(),
        frame.width(),
        frame.height(),
        ffmpeg_next::format::Pixel::RGBA,
        frame.width(),
        frame.height(),
        ffmpeg_next::software::scaling::Flags::BILINEAR,
    )
    .map_err(|e| Error::Thumbnail(format!("failed to create scaler: {e}")))?;

    let mut rgba_frame = ffmpeg_next::frame::Video::empty();
    scaler
        .run(&frame, &mut rgba_frame)
        .map_err(|e| Error::Thumbnail(format!("failed to scale frame: {e}")))?;

    let width = rgba_frame.width();
    let height = rgba_frame.height();
    let data = rgba_frame.data(0);
    let stride = rgba_frame.stride(0);
    let row_len = width as usize * 4;

    let mut rgba = Vec::with_capacity(row_len * height as usize);
    for y in 0..height as usize {
        let start = y * stride;
        rgba.extend_from_slice(&data[start..start + row_len]);
    }

    encode_jpeg(width, height, rgba)
}

/// Encodes a tightly packed RGBA buffer as JPEG.
pub fn encode_jpeg(width: u32, height: u32, rgba: Vec<u8>) -> Result<Vec<u8>> {
    let image = image_rs::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| Error::Thumbnail("frame buffer size mismatch".to_string()))?;
    let rgb = image_rs::DynamicImage::ImageRgba8(image).into_rgb8();

    let mut out = Vec::new();
    image_rs::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| Error::Thumbnail(format!("JPEG encoding failed: {e}")))?;
    Ok(out)
}
