// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Handlers borrow the pieces of `App` they touch through [`UpdateContext`]
//! and return the follow-up [`Task`].

use super::shell::{Shell, TransitionEvent};
use super::Message;
use crate::gallery::{self, AssetHost, AssetSource, LoaderOptions, Submission, Thumbnail};
use crate::media_player::{MediaPlayer, StreamKind};
use crate::ui::gallery::{self as gallery_view, SCROLLABLE_ID};
use crate::ui::notifications::{self, Notification};
use crate::ui::overlay;
use iced::widget::image::Handle;
use iced::widget::{operation, Id};
use iced::{window, Size, Task};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Mutable view of the application state used by the handlers.
pub struct UpdateContext<'a> {
    pub host: Option<&'a Arc<AssetHost>>,
    pub loader_options: &'a LoaderOptions,
    pub submit_url: &'a str,
    pub submissions: &'a mut Vec<Submission>,
    pub previews: &'a mut HashMap<u32, Handle>,
    pub extra_images: &'a mut HashMap<String, Handle>,
    pub player: &'a mut Option<MediaPlayer>,
    pub playback_session: &'a mut u64,
    pub loading: &'a mut bool,
    pub load_started: &'a mut Instant,
    pub load_generation: &'a mut u64,
    pub shell: &'a mut Shell,
    pub window_size: &'a mut Size,
    pub now: &'a mut Instant,
    pub notifications: &'a mut notifications::Manager,
}

pub fn update(ctx: &mut UpdateContext<'_>, message: Message) -> Task<Message> {
    match message {
        Message::Gallery(message) => handle_gallery_message(ctx, message),
        Message::Overlay(message) => handle_overlay_message(ctx, message),
        Message::Notification(message) => {
            ctx.notifications.handle_message(&message);
            Task::none()
        }
        Message::Playback(message) => {
            if let Some(player) = ctx.player.as_mut() {
                player.apply(message);
            }
            Task::none()
        }
        Message::SubmissionsLoaded {
            generation,
            submissions,
        } => handle_submissions_loaded(ctx, generation, submissions),
        Message::PreviewFetched {
            generation,
            id,
            handle,
        } => {
            if generation == *ctx.load_generation {
                if let Some(handle) = handle {
                    ctx.previews.insert(id, handle);
                }
            }
            Task::none()
        }
        Message::ExtraImageFetched { path, handle } => {
            if let Some(handle) = handle {
                ctx.extra_images.insert(path, handle);
            }
            Task::none()
        }
        Message::EscapePressed => close_overlay(ctx),
        Message::WindowResized(size) => {
            *ctx.window_size = size;
            Task::none()
        }
        Message::Tick(now) => handle_tick(ctx, now),
        Message::WindowCloseRequested(id) => {
            stop_player(ctx);
            ctx.shell.teardown();
            restore_scroll(ctx.shell).chain(window::close(id))
        }
    }
}

fn handle_gallery_message(
    ctx: &mut UpdateContext<'_>,
    message: gallery_view::Message,
) -> Task<Message> {
    match message {
        gallery_view::Message::Selected(id) => {
            let Some(submission) = ctx.submissions.iter().find(|s| s.id == id).cloned() else {
                tracing::warn!(id, "selected submission is not loaded");
                return Task::none();
            };
            let task = fetch_extra_images(ctx, &submission);
            start_player(ctx, &submission);
            ctx.shell.open_overlay(submission, Instant::now());
            task
        }
        gallery_view::Message::OpenSubmitForm => {
            open_external(ctx.notifications, ctx.submit_url, "notification-open-link-error");
            Task::none()
        }
        gallery_view::Message::Reload => start_load(ctx),
        gallery_view::Message::Scrolled(offset) => {
            ctx.shell.record_scroll(offset);
            Task::none()
        }
    }
}

fn handle_overlay_message(ctx: &mut UpdateContext<'_>, message: overlay::Message) -> Task<Message> {
    match message {
        overlay::Message::Close => close_overlay(ctx),
        overlay::Message::TogglePlayback => {
            if let Some(player) = ctx.player.as_mut() {
                player.toggle();
            }
            Task::none()
        }
        overlay::Message::OpenMedia => {
            let target = match (ctx.shell.selected(), ctx.host) {
                (Some(submission), Some(host)) => host.locate(&submission.media),
                _ => return Task::none(),
            };
            open_external(ctx.notifications, &target, "notification-open-media-error");
            Task::none()
        }
        overlay::Message::LearnMore(url) => {
            open_external(ctx.notifications, &url, "notification-open-link-error");
            Task::none()
        }
    }
}

fn close_overlay(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if ctx.shell.close_overlay(Instant::now()).is_none() {
        return Task::none();
    }
    stop_player(ctx);
    restore_scroll(ctx.shell)
}

/// Starts in-sheet playback when `submission` is a video or audio piece.
fn start_player(ctx: &mut UpdateContext<'_>, submission: &Submission) {
    stop_player(ctx);

    let (Some(kind), Some(host)) = (StreamKind::for_media(submission.kind), ctx.host) else {
        return;
    };

    *ctx.playback_session += 1;
    let locator = host.locate(&submission.media);
    tracing::debug!(session = *ctx.playback_session, location = %locator, "starting playback");
    *ctx.player = Some(MediaPlayer::new(*ctx.playback_session, locator, kind));
}

/// Stops the running player; dropping it ends its subscription.
fn stop_player(ctx: &mut UpdateContext<'_>) {
    if let Some(mut player) = ctx.player.take() {
        player.stop();
    }
}

/// Snaps the page back to the offset held by the released scroll lock.
fn restore_scroll(shell: &mut Shell) -> Task<Message> {
    match shell.take_scroll_restore() {
        Some(offset) => operation::snap_to(Id::new(SCROLLABLE_ID), offset),
        None => Task::none(),
    }
}

fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    *ctx.now = now;
    ctx.notifications.tick(now);

    match ctx.shell.advance(now) {
        Some(TransitionEvent::Closed(ticket)) => {
            ctx.shell.finish_close(ticket);
        }
        Some(TransitionEvent::Opened) | None => {}
    }
    Task::none()
}

/// Starts a loader run. Results of earlier runs are ignored once they arrive.
fn start_load(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(host) = ctx.host.cloned() else {
        tracing::warn!("no asset host, nothing to load");
        return Task::none();
    };

    *ctx.load_generation += 1;
    *ctx.loading = true;
    *ctx.load_started = Instant::now();
    *ctx.now = *ctx.load_started;

    let generation = *ctx.load_generation;
    let options = ctx.loader_options.clone();
    tracing::info!(generation, source = %host, "loading submissions");

    Task::perform(
        async move { gallery::load_all(&*host, &gallery::FfmpegGrabber, &options).await },
        move |submissions| Message::SubmissionsLoaded {
            generation,
            submissions,
        },
    )
}

fn handle_submissions_loaded(
    ctx: &mut UpdateContext<'_>,
    generation: u64,
    submissions: Vec<Submission>,
) -> Task<Message> {
    if generation != *ctx.load_generation {
        tracing::debug!(generation, current = *ctx.load_generation, "dropping stale load");
        return Task::none();
    }

    *ctx.loading = false;
    *ctx.submissions = submissions;
    ctx.previews.clear();
    ctx.extra_images.clear();

    let Some(host) = ctx.host else {
        return Task::none();
    };

    let tasks: Vec<Task<Message>> = ctx
        .submissions
        .iter()
        .filter_map(|submission| {
            let id = submission.id;
            match submission.thumbnail.as_ref()? {
                Thumbnail::Generated(bytes) => {
                    ctx.previews
                        .insert(id, Handle::from_bytes(bytes.to_vec()));
                    None
                }
                Thumbnail::Asset(path) => Some(fetch_bytes(
                    Arc::clone(host),
                    path.clone(),
                    move |handle| Message::PreviewFetched {
                        generation,
                        id,
                        handle,
                    },
                )),
            }
        })
        .collect();

    Task::batch(tasks)
}

/// Fetches additional overlay images that are not cached yet.
fn fetch_extra_images(ctx: &UpdateContext<'_>, submission: &Submission) -> Task<Message> {
    let Some(host) = ctx.host else {
        return Task::none();
    };

    Task::batch(
        submission
            .additional_images
            .iter()
            .filter(|path| !ctx.extra_images.contains_key(*path))
            .map(|path| {
                let key = path.clone();
                fetch_bytes(Arc::clone(host), path.clone(), move |handle| {
                    Message::ExtraImageFetched {
                        path: key.clone(),
                        handle,
                    }
                })
            }),
    )
}

/// Fetches `path` from the host and wraps the bytes in an image handle.
fn fetch_bytes<F>(host: Arc<AssetHost>, path: String, to_message: F) -> Task<Message>
where
    F: Fn(Option<Handle>) -> Message + Send + 'static,
{
    Task::perform(
        async move {
            match host.fetch_bytes(&path).await {
                Ok(bytes) => Some(Handle::from_bytes(bytes)),
                Err(err) => {
                    tracing::debug!(path = %path, error = %err, "preview unavailable");
                    None
                }
            }
        },
        to_message,
    )
}

/// Hands `target` to the system opener, reporting failures as a toast.
fn open_external(notifications: &mut notifications::Manager, target: &str, error_key: &str) {
    tracing::debug!(location = target, "opening externally");
    if let Err(err) = open::that_detached(target) {
        tracing::warn!(location = target, error = %err, "system opener failed");
        notifications.push(Notification::error(error_key).with_arg("target", target));
    }
}
