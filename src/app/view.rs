// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Layers, bottom to top: the gallery page, the overlay while a submission
//! is selected, and the toast stack.

use super::shell::Shell;
use super::Message;
use crate::gallery::Submission;
use crate::i18n::fluent::I18n;
use crate::media_player::MediaPlayer;
use crate::ui::notifications::{self, Toast};
use crate::ui::{gallery, overlay};
use chrono::Datelike;
use iced::widget::image::Handle;
use iced::widget::Stack;
use iced::{Element, Length, Size};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub submissions: &'a [Submission],
    pub previews: &'a HashMap<u32, Handle>,
    pub extra_images: &'a HashMap<String, Handle>,
    pub player: Option<&'a MediaPlayer>,
    pub loading: bool,
    pub loading_elapsed: Duration,
    pub shell: &'a Shell,
    pub window_size: Size,
    pub now: Instant,
    pub notifications: &'a notifications::Manager,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let page = gallery::view(gallery::ViewContext {
        i18n: ctx.i18n,
        submissions: ctx.submissions,
        previews: ctx.previews,
        loading: ctx.loading,
        loading_elapsed: ctx.loading_elapsed,
        window_width: ctx.window_size.width,
        scroll_locked: ctx.shell.is_scroll_locked(),
    })
    .map(Message::Gallery);

    let mut stack = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(page);

    // Kept through the slide-out; the shell clears it afterwards
    if let Some(submission) = ctx.shell.selected() {
        let sheet = overlay::view(overlay::ViewContext {
            i18n: ctx.i18n,
            submission,
            preview: ctx.previews.get(&submission.id),
            extra_images: ctx.extra_images,
            player: ctx.player,
            progress: ctx.shell.progress(ctx.now),
            window: ctx.window_size,
            current_year: chrono::Local::now().year(),
        })
        .map(Message::Overlay);
        stack = stack.push(sheet);
    }

    stack
        .push(Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification))
        .into()
}
