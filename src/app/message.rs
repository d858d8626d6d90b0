// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::gallery::Submission;
use crate::media_player::PlaybackMessage;
use crate::ui::{gallery, notifications, overlay};
use iced::widget::image::Handle;
use iced::{window, Size};
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// view messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Gallery(gallery::Message),
    Overlay(overlay::Message),
    Notification(notifications::NotificationMessage),
    /// Frames and state changes from the in-sheet player.
    Playback(PlaybackMessage),
    /// A loader run finished; `generation` identifies the run.
    SubmissionsLoaded {
        generation: u64,
        submissions: Vec<Submission>,
    },
    /// Preview bytes for a tile or overlay poster, decoded by the image widget later.
    PreviewFetched {
        generation: u64,
        id: u32,
        handle: Option<Handle>,
    },
    /// An additional overlay image was fetched.
    ExtraImageFetched {
        path: String,
        handle: Option<Handle>,
    },
    /// Escape was pressed with nothing else capturing it.
    EscapePressed,
    WindowResized(Size),
    /// Animation frame or periodic tick.
    Tick(Instant),
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(window::Id),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional asset host, a base URL or a local directory.
    /// Takes precedence over `gallery.source` in `settings.toml`.
    pub source: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_GALLERY_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
