// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the gallery and the overlay.
//!
//! The `App` struct wires together the loader, localization, and the overlay
//! shell, and translates messages into side effects like asset fetches or
//! handing links to the system opener.

mod message;
pub mod paths;
pub mod shell;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use shell::{CloseTicket, OverlayPhase, ScrollLock, Shell, TransitionEvent};

use crate::config::{self, Config};
use crate::gallery::{AssetHost, LoaderOptions, Submission};
use crate::i18n::fluent::I18n;
use crate::media_player::MediaPlayer;
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::{AppTheme, ThemeMode};
use iced::widget::image::Handle;
use iced::{window, Element, Size, Subscription, Task, Theme};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    theme_mode: ThemeMode,
    /// Asset host; `None` when the configured source could not be set up.
    host: Option<Arc<AssetHost>>,
    loader_options: LoaderOptions,
    submit_url: String,
    submissions: Vec<Submission>,
    /// Decoded tile previews keyed by submission id.
    previews: HashMap<u32, Handle>,
    /// Decoded additional overlay images keyed by asset path.
    extra_images: HashMap<String, Handle>,
    /// In-sheet playback of the open video or audio submission.
    player: Option<MediaPlayer>,
    /// Bumped for every player; keys its subscription.
    playback_session: u64,
    loading: bool,
    load_started: Instant,
    /// Bumped for every loader run; stale results are dropped.
    load_generation: u64,
    shell: Shell,
    window_size: Size,
    /// Time of the most recent frame, drives animations in `view`.
    now: Instant,
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("host", &self.host)
            .field("submissions", &self.submissions.len())
            .field("loading", &self.loading)
            .field("phase", &self.shell.phase())
            .field("player", &self.player.as_ref().map(MediaPlayer::state))
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 800;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 360;

/// Builds the window settings. Close requests are handled by the app so the
/// overlay can be torn down first.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH as f32, MIN_WINDOW_HEIGHT as f32)),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a Fn boot closure; flags are consumed on the first call
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads configuration, then starts the first loader run.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.config_dir);
        let (mut config, config_warning) = config::load();
        if let Some(source) = flags.source {
            config.gallery.source = Some(source);
        }

        let mut app = Self::with_config(flags.lang, &config);
        if let Some(key) = config_warning {
            app.notifications.push(Notification::warning(key));
        }

        let task = app.start_load();
        (app, task)
    }

    /// Builds the idle application state for `config` without touching the disk.
    pub(crate) fn with_config(lang: Option<String>, config: &Config) -> Self {
        let mut notifications = notifications::Manager::new();
        let host = match AssetHost::from_location(
            config.gallery.source(),
            config.loader.request_timeout(),
        ) {
            Ok(host) => {
                tracing::info!(source = %host, "using asset host");
                Some(Arc::new(host))
            }
            Err(err) => {
                tracing::error!(source = config.gallery.source(), error = %err, "asset host unavailable");
                notifications.push(Notification::error("notification-source-error"));
                None
            }
        };

        let now = Instant::now();
        Self {
            i18n: I18n::new(lang, config),
            theme_mode: config.general.theme_mode,
            host,
            loader_options: LoaderOptions::from_config(config),
            submit_url: config.gallery.submit_url().to_string(),
            submissions: Vec::new(),
            previews: HashMap::new(),
            extra_images: HashMap::new(),
            player: None,
            playback_session: 0,
            loading: false,
            load_started: now,
            load_generation: 0,
            shell: Shell::new(config.overlay.transition()),
            window_size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
            now,
            notifications,
        }
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.shell.selected() {
            Some(submission) if self.shell.is_open() => format!("{} - {app_name}", submission.title),
            _ => app_name,
        }
    }

    fn theme(&self) -> Theme {
        AppTheme::new(self.theme_mode).iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription();
        let tick_sub = subscription::create_tick_subscription(
            self.shell.is_animating() || self.loading,
            self.notifications.has_notifications(),
        );

        let playback_sub = match &self.player {
            Some(player) => player.subscription().map(Message::Playback),
            None => Subscription::none(),
        };

        Subscription::batch([event_sub, tick_sub, playback_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            host: self.host.as_ref(),
            loader_options: &self.loader_options,
            submit_url: &self.submit_url,
            submissions: &mut self.submissions,
            previews: &mut self.previews,
            extra_images: &mut self.extra_images,
            player: &mut self.player,
            playback_session: &mut self.playback_session,
            loading: &mut self.loading,
            load_started: &mut self.load_started,
            load_generation: &mut self.load_generation,
            shell: &mut self.shell,
            window_size: &mut self.window_size,
            now: &mut self.now,
            notifications: &mut self.notifications,
        };
        update::update(&mut ctx, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            submissions: &self.submissions,
            previews: &self.previews,
            extra_images: &self.extra_images,
            player: self.player.as_ref(),
            loading: self.loading,
            loading_elapsed: self.now.saturating_duration_since(self.load_started),
            shell: &self.shell,
            window_size: self.window_size,
            now: self.now,
            notifications: &self.notifications,
        })
    }

    /// Starts a new loader run, superseding any run still in flight.
    fn start_load(&mut self) -> Task<Message> {
        self.update(Message::Gallery(crate::ui::gallery::Message::Reload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::metadata;
    use crate::media_player::{PlaybackState, StreamKind};
    use crate::ui::{gallery, overlay};
    use iced::widget::scrollable::RelativeOffset;
    use std::time::Duration;
    use tempfile::tempdir;

    fn app_with_source(source: &str) -> App {
        let mut config = Config::default();
        config.gallery.source = Some(source.to_string());
        config.overlay.transition_ms = Some(600);
        App::with_config(Some("en-US".to_string()), &config)
    }

    fn submission(id: u32, title: &str) -> Submission {
        media_submission(id, title, "image", "artwork.jpg")
    }

    fn media_submission(id: u32, title: &str, medium: &str, file: &str) -> Submission {
        Submission::new(
            id,
            format!("{id:03}"),
            metadata::parse(&format!(
                "title: {title}\nartist: Jane Doe\nmedium: {medium}"
            )),
            format!("/submissions/{id:03}/{file}"),
            None,
            Vec::new(),
        )
    }

    fn app_with_clip() -> (App, tempfile::TempDir) {
        let (mut app, dir) = loaded_app();
        let generation = app.load_generation;
        let _ = app.update(Message::SubmissionsLoaded {
            generation,
            submissions: vec![
                media_submission(3, "Tide", "video", "clip.mp4"),
                submission(1, "Still Life"),
            ],
        });
        (app, dir)
    }

    fn loaded_app() -> (App, tempfile::TempDir) {
        let dir = tempdir().expect("temp dir");
        let mut app = app_with_source(dir.path().to_str().expect("utf-8 path"));
        let generation = app.load_generation;
        let _ = app.update(Message::SubmissionsLoaded {
            generation,
            submissions: vec![submission(2, "Dusk"), submission(1, "Still Life")],
        });
        (app, dir)
    }

    #[test]
    fn new_app_is_idle_with_closed_overlay() {
        let dir = tempdir().expect("temp dir");
        let app = app_with_source(dir.path().to_str().expect("utf-8 path"));
        assert!(!app.loading);
        assert_eq!(app.shell.phase(), OverlayPhase::Closed);
        assert!(app.host.is_some());
    }

    #[test]
    fn reload_marks_loading_and_bumps_generation() {
        let dir = tempdir().expect("temp dir");
        let mut app = app_with_source(dir.path().to_str().expect("utf-8 path"));
        let _ = app.start_load();
        assert!(app.loading);
        assert_eq!(app.load_generation, 1);
    }

    #[test]
    fn stale_load_results_are_dropped() {
        let (mut app, _dir) = loaded_app();
        let stale = app.load_generation;
        let _ = app.start_load();

        let _ = app.update(Message::SubmissionsLoaded {
            generation: stale,
            submissions: vec![submission(9, "Old")],
        });
        assert!(app.loading);
        assert!(app.submissions.iter().all(|s| s.id != 9));
    }

    #[test]
    fn selecting_a_tile_opens_the_overlay() {
        let (mut app, _dir) = loaded_app();
        let _ = app.update(Message::Gallery(gallery::Message::Selected(1)));

        assert!(app.shell.is_open());
        assert_eq!(app.shell.selected().map(|s| s.id), Some(1));
        assert_eq!(app.title(), "Still Life - Coping with Art");
    }

    #[test]
    fn selecting_an_unknown_id_is_ignored() {
        let (mut app, _dir) = loaded_app();
        let _ = app.update(Message::Gallery(gallery::Message::Selected(42)));
        assert_eq!(app.shell.phase(), OverlayPhase::Closed);
    }

    #[test]
    fn escape_closes_and_tick_completes_the_slide() {
        let (mut app, _dir) = loaded_app();
        let _ = app.update(Message::Gallery(gallery::Message::Selected(2)));
        let _ = app.update(Message::EscapePressed);

        assert!(!app.shell.is_open());
        assert_eq!(app.shell.selected().map(|s| s.id), Some(2));

        let later = Instant::now() + Duration::from_secs(2);
        let _ = app.update(Message::Tick(later));
        assert!(app.shell.selected().is_none());
        assert_eq!(app.shell.phase(), OverlayPhase::Closed);
    }

    #[test]
    fn backdrop_close_message_closes_overlay() {
        let (mut app, _dir) = loaded_app();
        let _ = app.update(Message::Gallery(gallery::Message::Selected(2)));
        let _ = app.update(Message::Overlay(overlay::Message::Close));
        assert_eq!(app.shell.phase(), OverlayPhase::Closing);
    }

    #[test]
    fn page_scrolls_are_ignored_while_overlay_is_open() {
        let (mut app, _dir) = loaded_app();
        let before = RelativeOffset { x: 0.0, y: 0.3 };
        let _ = app.update(Message::Gallery(gallery::Message::Scrolled(before)));
        let _ = app.update(Message::Gallery(gallery::Message::Selected(1)));

        let _ = app.update(Message::Gallery(gallery::Message::Scrolled(RelativeOffset {
            x: 0.0,
            y: 0.9,
        })));

        assert_eq!(app.shell.scroll_lock(), Some(ScrollLock { offset: before }));
    }

    #[test]
    fn close_request_tears_down_overlay() {
        let (mut app, _dir) = loaded_app();
        let _ = app.update(Message::Gallery(gallery::Message::Selected(1)));
        let _ = app.update(Message::WindowCloseRequested(window::Id::unique()));

        assert_eq!(app.shell.phase(), OverlayPhase::Closed);
        assert!(!app.shell.is_scroll_locked());
    }

    #[test]
    fn selecting_a_video_starts_a_player() {
        let (mut app, _dir) = app_with_clip();
        let _ = app.update(Message::Gallery(gallery::Message::Selected(3)));

        let player = app.player.as_ref().expect("video should get a player");
        assert_eq!(player.kind(), StreamKind::Video);
        assert_eq!(player.session(), 1);
        assert_eq!(player.state(), &PlaybackState::Starting);
    }

    #[test]
    fn selecting_an_image_has_no_player() {
        let (mut app, _dir) = app_with_clip();
        let _ = app.update(Message::Gallery(gallery::Message::Selected(1)));
        assert!(app.player.is_none());
    }

    #[test]
    fn closing_the_overlay_drops_the_player() {
        let (mut app, _dir) = app_with_clip();
        let _ = app.update(Message::Gallery(gallery::Message::Selected(3)));
        let _ = app.update(Message::Overlay(overlay::Message::Close));
        assert!(app.player.is_none());

        let _ = app.update(Message::Gallery(gallery::Message::Selected(3)));
        assert_eq!(app.player.as_ref().map(MediaPlayer::session), Some(2));

        let _ = app.update(Message::WindowCloseRequested(window::Id::unique()));
        assert!(app.player.is_none());
    }

    #[test]
    fn reloading_forgets_extra_images() {
        let (mut app, _dir) = loaded_app();
        app.extra_images.insert(
            "/submissions/001/detail.jpg".to_string(),
            Handle::from_rgba(1, 1, vec![0, 0, 0, 255]),
        );

        let generation = app.load_generation;
        let _ = app.update(Message::SubmissionsLoaded {
            generation,
            submissions: vec![submission(1, "Still Life")],
        });
        assert!(app.extra_images.is_empty());
    }

    #[test]
    fn window_resize_is_tracked() {
        let (mut app, _dir) = loaded_app();
        let _ = app.update(Message::WindowResized(Size::new(900.0, 700.0)));
        assert_eq!(app.window_size, Size::new(900.0, 700.0));
    }
}
