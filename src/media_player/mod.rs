// SPDX-License-Identifier: MPL-2.0
//! In-sheet playback for video and audio submissions.
//!
//! Videos run looped and muted, the way a poster would move. Audio
//! submissions run looped through the default output device. Both can be
//! paused from the sheet.
//!
//! Decoding happens on the blocking pool (`FFmpeg` types are not `Send`);
//! [`subscription::playback`] bridges the decoders to the Iced event loop
//! and hands the app a [`CommandSender`] once the session is up.

pub mod audio;
pub mod audio_output;
pub mod decoder;
pub mod subscription;

pub use decoder::DecodedFrame;
pub use subscription::{CommandSender, PlaybackEvent, PlaybackMessage};

use crate::error::{Error, Result};
use crate::gallery::MediaKind;
use iced::widget::image::Handle;
use iced::Subscription;
use std::time::{Duration, Instant};

/// Output volume of audio submissions, before the perceptual curve.
pub const DEFAULT_VOLUME: f32 = 0.8;

/// Commands understood by both decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    Play,
    Pause,
    Stop,
}

/// Which stream of the media file gets decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Video,
    Audio,
}

impl StreamKind {
    /// Stream to play for a submission, `None` for stills and writing.
    #[must_use]
    pub fn for_media(kind: MediaKind) -> Option<Self> {
        match kind {
            MediaKind::Video => Some(StreamKind::Video),
            MediaKind::Audio => Some(StreamKind::Audio),
            MediaKind::Image | MediaKind::Writing => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    /// Waiting for the decoder to come up.
    Starting,
    Playing,
    Paused,
    /// Playback failed; the sheet falls back to the poster.
    Error { message: String },
}

/// Playback of the primary media of the open submission.
///
/// One player lives for one overlay session. The session number keys the
/// subscription, so opening another submission starts a fresh decoder and
/// events still in flight from the old one are ignored.
#[derive(Debug)]
pub struct MediaPlayer {
    session: u64,
    locator: String,
    kind: StreamKind,
    state: PlaybackState,
    sender: Option<CommandSender>,
    frame: Option<Handle>,
}

impl MediaPlayer {
    #[must_use]
    pub fn new(session: u64, locator: impl Into<String>, kind: StreamKind) -> Self {
        Self {
            session,
            locator: locator.into(),
            kind,
            state: PlaybackState::Starting,
            sender: None,
            frame: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> u64 {
        self.session
    }

    #[must_use]
    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Latest decoded video frame.
    #[must_use]
    pub fn frame(&self) -> Option<&Handle> {
        self.frame.as_ref()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    #[must_use]
    pub fn subscription(&self) -> Subscription<PlaybackMessage> {
        subscription::playback(self.locator.clone(), self.kind, self.session)
    }

    /// Applies an event from the playback subscription.
    ///
    /// Returns `false` when the event belongs to another session.
    pub fn apply(&mut self, message: PlaybackMessage) -> bool {
        if message.session != self.session {
            tracing::debug!(
                session = message.session,
                current = self.session,
                "dropping stale playback event"
            );
            return false;
        }

        match message.event {
            PlaybackEvent::Started(sender) => {
                self.sender = Some(sender);
                if self.state == PlaybackState::Starting {
                    self.state = PlaybackState::Playing;
                }
            }
            PlaybackEvent::FrameReady(frame) => {
                self.frame = Some(Handle::from_rgba(
                    frame.width,
                    frame.height,
                    frame.rgba_data.to_vec(),
                ));
            }
            PlaybackEvent::Error(message) => {
                tracing::warn!(location = %self.locator, error = %message, "playback failed");
                self.state = PlaybackState::Error { message };
            }
        }
        true
    }

    /// Pauses a playing session or resumes a paused one.
    pub fn toggle(&mut self) {
        let (command, next) = match self.state {
            PlaybackState::Playing => (PlayerCommand::Pause, PlaybackState::Paused),
            PlaybackState::Paused => (PlayerCommand::Play, PlaybackState::Playing),
            PlaybackState::Starting | PlaybackState::Error { .. } => return,
        };

        match self.send(command) {
            Ok(()) => self.state = next,
            Err(err) => {
                tracing::warn!(error = %err, "playback command dropped");
                self.state = PlaybackState::Error {
                    message: err.to_string(),
                };
            }
        }
    }

    /// Asks the decoders to shut down. The subscription ends once the player
    /// is dropped.
    pub fn stop(&mut self) {
        if let Err(err) = self.send(PlayerCommand::Stop) {
            tracing::debug!(error = %err, "player already stopped");
        }
        self.sender = None;
    }

    fn send(&self, command: PlayerCommand) -> Result<()> {
        match &self.sender {
            Some(sender) => sender.send(command),
            None => Err(Error::Playback("player is not running".into())),
        }
    }
}

/// Wall-clock pacing of decoded media against its timestamps.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Pacer {
    started_at: Option<Instant>,
    first_pts: Option<f64>,
}

impl Pacer {
    /// (Re)starts the clock at `now`; the next timestamp becomes the reference.
    pub(crate) fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.first_pts = None;
    }

    pub(crate) fn stop(&mut self) {
        self.started_at = None;
        self.first_pts = None;
    }

    /// How long to wait before handing out media stamped `pts_secs`,
    /// `lead_secs` ahead of its presentation time.
    pub(crate) fn delay(&mut self, pts_secs: f64, lead_secs: f64, now: Instant) -> Option<Duration> {
        let started_at = self.started_at?;
        let first = *self.first_pts.get_or_insert(pts_secs);
        let offset = pts_secs - first - lead_secs;
        if !offset.is_finite() || offset <= 0.0 {
            return None;
        }
        let target = started_at + Duration::from_secs_f64(offset);
        target.checked_duration_since(now).filter(|wait| !wait.is_zero())
    }
}

/// Rejects local paths that do not exist. URLs are left to `FFmpeg`.
pub(crate) fn check_locator(locator: &str) -> Result<()> {
    if locator.contains("://") || std::path::Path::new(locator).exists() {
        Ok(())
    } else {
        Err(Error::Playback(format!("media not found: {locator}")))
    }
}

/// Converts a stream timestamp to seconds.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn pts_to_secs(pts: Option<i64>, time_base: ffmpeg_next::Rational) -> f64 {
    let time_base = f64::from(time_base.numerator()) / f64::from(time_base.denominator());
    pts.map_or(0.0, |pts| pts as f64 * time_base)
}
