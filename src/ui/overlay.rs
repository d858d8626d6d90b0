// SPDX-License-Identifier: MPL-2.0
//! Detail sheet for one submission, sliding up over the gallery.
//!
//! The sheet covers most of the window height and is anchored to the bottom
//! edge. `progress` from the shell moves it between fully hidden (0.0) and
//! fully shown (1.0). Everything around the sheet is a backdrop that closes
//! the overlay when clicked.

use crate::gallery::{MediaKind, Submission};
use crate::i18n::fluent::I18n;
use crate::media_player::{MediaPlayer, PlaybackState};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::gallery::play_badge;
use crate::ui::styles;
use crate::ui::widgets::{PlayGlyph, Waveform};
use iced::widget::image::{self, Handle};
use iced::widget::{
    button, container, mouse_area, opaque, scrollable, text, tooltip, Column, Container, Row,
    Space, Stack,
};
use iced::{alignment, ContentFit, Element, Length, Size};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub enum Message {
    Close,
    /// Pause or resume in-sheet playback.
    TogglePlayback,
    /// Hand the primary media to the system player.
    OpenMedia,
    LearnMore(String),
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub submission: &'a Submission,
    /// Decoded poster or picture for the primary media.
    pub preview: Option<&'a Handle>,
    /// Decoded additional images keyed by asset path.
    pub extra_images: &'a HashMap<String, Handle>,
    /// Playback of the primary media, for video and audio.
    pub player: Option<&'a MediaPlayer>,
    /// Visible share of the sheet, eased.
    pub progress: f32,
    pub window: Size,
    /// Year used when the submission carries no copyright line.
    pub current_year: i32,
}

/// Sheet size for a window, as `(width, height)`.
#[must_use]
pub fn panel_size(window: Size) -> (f32, f32) {
    let height = window.height * sizing::OVERLAY_HEIGHT_RATIO;
    let width = if crate::ui::gallery::columns_for_width(window.width) > 1 {
        window.width * sizing::OVERLAY_WIDTH_RATIO
    } else {
        window.width
    };
    (width.max(0.0), height.max(0.0))
}

/// Gap above the sheet for a given progress.
#[must_use]
pub fn top_offset(window: Size, progress: f32) -> f32 {
    let (_, height) = panel_size(window);
    let resting = (window.height - height).max(0.0);
    resting + (1.0 - progress.clamp(0.0, 1.0)) * height
}

/// Localized label of the close control, shown as its tooltip.
#[must_use]
pub fn close_label(i18n: &I18n) -> String {
    i18n.tr("overlay-close")
}

/// Label key of the play/pause button and whether it can be pressed.
///
/// Playback starts on its own, so the button reads "Pause" while the
/// decoder comes up. Failed sessions get no button.
#[must_use]
pub fn toggle_control(state: &PlaybackState) -> Option<(&'static str, bool)> {
    match state {
        PlaybackState::Starting => Some(("overlay-pause", false)),
        PlaybackState::Playing => Some(("overlay-pause", true)),
        PlaybackState::Paused => Some(("overlay-play", true)),
        PlaybackState::Error { .. } => None,
    }
}

/// Copyright line, falling back to an all-rights-reserved notice.
#[must_use]
pub fn copyright_line(i18n: &I18n, submission: &Submission, current_year: i32) -> String {
    match submission.metadata.copyright() {
        Some(copyright) => copyright.to_string(),
        None => i18n.tr_with_args(
            "overlay-copyright-default",
            &[
                ("year", current_year.to_string().as_str()),
                ("artist", submission.artist.as_str()),
            ],
        ),
    }
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let (panel_width, panel_height) = panel_size(ctx.window);
    let gap = top_offset(ctx.window, ctx.progress);
    let side = ((ctx.window.width - panel_width) / 2.0).max(0.0);

    let sheet = Container::new(
        scrollable(content(&ctx))
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .width(Length::Fixed(panel_width))
    .height(Length::Fixed(panel_height))
    .style(styles::container::overlay_panel);

    let sheet_row = Row::new()
        .height(Length::Fixed(panel_height))
        .push(backdrop_area(Length::Fixed(side), Length::Fill))
        .push(sheet)
        .push(backdrop_area(Length::Fixed(side), Length::Fill));

    let layer = Column::new()
        .push(backdrop_area(Length::Fill, Length::Fixed(gap)))
        .push(sheet_row);

    let washed = Container::new(layer)
        .width(Length::Fill)
        .height(Length::Fill)
        .clip(true)
        .style(styles::container::backdrop);

    opaque(washed)
}

fn backdrop_area<'a>(width: Length, height: Length) -> Element<'a, Message> {
    mouse_area(Space::new().width(width).height(height))
        .on_press(Message::Close)
        .into()
}

fn content<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let submission = ctx.submission;

    let close = styles::tooltip::styled(
        button(text("×").size(typography::TITLE_SM))
            .padding([spacing::XXS, spacing::SM])
            .on_press(Message::Close)
            .style(styles::button::close),
        close_label(i18n),
        tooltip::Position::Left,
    );
    let close_row = Container::new(close)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Right);

    let mut column = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .push(close_row)
        .push(primary_media(ctx));

    for path in &submission.additional_images {
        column = column.push(additional_image(ctx.extra_images.get(path)));
    }

    column = column.push(heading(i18n, submission));

    if let Some(details) = details(i18n, submission) {
        column = column.push(details);
    }

    column = column.push(
        text(copyright_line(i18n, submission, ctx.current_year))
            .size(typography::CAPTION)
            .style(|theme: &iced::Theme| text::Style {
                color: Some(theme.extended_palette().background.strong.text),
            }),
    );

    if let Some(email) = submission.metadata.email() {
        column = column.push(
            text(i18n.tr_with_args("overlay-contact", &[("email", email)]))
                .size(typography::CAPTION),
        );
    }

    if let Some(url) = submission.learn_more_url() {
        column = column.push(
            button(text(i18n.tr("overlay-learn-more")).size(typography::BODY))
                .padding([spacing::XS, spacing::MD])
                .on_press(Message::LearnMore(url))
                .style(styles::button::primary),
        );
    }

    column.into()
}

fn primary_media<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let submission = ctx.submission;
    let height = Length::Fixed(sizing::OVERLAY_MEDIA_HEIGHT);

    match submission.kind {
        MediaKind::Image => picture(ctx.preview, height),
        MediaKind::Writing => writing(ctx.i18n, submission),
        MediaKind::Video | MediaKind::Audio => playable(ctx, height),
    }
}

/// Player stage for video and audio, with play/pause and "Open media".
fn playable<'a>(ctx: &ViewContext<'a>, height: Length) -> Element<'a, Message> {
    let submission = ctx.submission;
    let player = ctx.player;
    let playing = player.is_some_and(MediaPlayer::is_playing);

    let base: Element<'a, Message> = match player.and_then(MediaPlayer::frame) {
        Some(frame) if submission.kind == MediaKind::Video => picture(Some(frame), height),
        _ => poster(ctx, height),
    };

    let stage: Element<'a, Message> = if playing {
        base
    } else {
        Stack::new()
            .width(Length::Fill)
            .height(height)
            .push(base)
            .push(
                Container::new(play_badge())
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(alignment::Horizontal::Center)
                    .align_y(alignment::Vertical::Center),
            )
            .into()
    };

    let mut controls = Row::new().spacing(spacing::SM);
    if let Some((key, enabled)) = player.and_then(|player| toggle_control(player.state())) {
        controls = controls.push(
            button(text(ctx.i18n.tr(key)).size(typography::BODY))
                .padding([spacing::XS, spacing::MD])
                .on_press_maybe(enabled.then_some(Message::TogglePlayback))
                .style(styles::button::primary),
        );
    }
    controls = controls.push(
        button(text(ctx.i18n.tr("overlay-open-media")).size(typography::BODY))
            .padding([spacing::XS, spacing::MD])
            .on_press(Message::OpenMedia)
            .style(styles::button::secondary),
    );

    let mut column = Column::new().spacing(spacing::SM).push(stage);
    if let Some(PlaybackState::Error { .. }) = player.map(MediaPlayer::state) {
        column = column.push(text(ctx.i18n.tr("overlay-playback-error")).size(typography::CAPTION));
    }
    column.push(controls).into()
}

/// Still shown before the first frame, for audio, and when playback failed.
fn poster<'a>(ctx: &ViewContext<'a>, height: Length) -> Element<'a, Message> {
    match (ctx.preview, ctx.submission.kind) {
        (Some(handle), _) => picture(Some(handle), height),
        (None, MediaKind::Audio) if ctx.submission.thumbnail.is_none() => {
            framed(Waveform::new().into_element(sizing::WAVEFORM_HEIGHT), height)
        }
        (None, _) => framed(
            PlayGlyph::new(palette::GRAY_400).into_element(sizing::ICON_XL),
            height,
        ),
    }
}

fn picture<'a>(handle: Option<&Handle>, height: Length) -> Element<'a, Message> {
    match handle {
        Some(handle) => image::Image::new(handle.clone())
            .width(Length::Fill)
            .height(height)
            .content_fit(ContentFit::Contain)
            .into(),
        None => framed(Space::new().into(), height),
    }
}

fn framed<'a>(content: Element<'a, Message>, height: Length) -> Element<'a, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(height)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::placeholder)
        .into()
}

fn additional_image<'a>(handle: Option<&Handle>) -> Element<'a, Message> {
    picture(handle, Length::Fixed(sizing::OVERLAY_EXTRA_IMAGE_HEIGHT))
}

fn writing<'a>(i18n: &I18n, submission: &'a Submission) -> Element<'a, Message> {
    let body = match submission.metadata.writing() {
        Some(writing) => text(writing).size(typography::BODY_LG),
        None => text(i18n.tr("overlay-no-writing")).size(typography::BODY),
    };

    container(scrollable(Container::new(body).padding(spacing::LG)))
        .width(Length::Fill)
        .max_height(sizing::OVERLAY_MEDIA_HEIGHT)
        .style(styles::container::writing)
        .into()
}

fn heading<'a>(i18n: &I18n, submission: &'a Submission) -> Element<'a, Message> {
    let mut column = Column::new()
        .spacing(spacing::XS)
        .push(text(submission.title.as_str()).size(typography::TITLE_LG))
        .push(
            text(i18n.tr_with_args("overlay-by", &[("artist", submission.artist.as_str())]))
                .size(typography::BODY_LG),
        );

    if let Some(description) = submission.metadata.description() {
        column = column.push(
            Container::new(text(description).size(typography::BODY))
                .padding([spacing::XS, 0.0]),
        );
    }

    column.into()
}

/// Label/value rows for the metadata fields that are present.
fn details<'a>(i18n: &I18n, submission: &'a Submission) -> Option<Element<'a, Message>> {
    let metadata = &submission.metadata;
    let rows: Vec<(String, &'a str)> = [
        ("overlay-detail-medium", metadata.medium()),
        ("overlay-detail-dimensions", metadata.dimensions()),
        ("overlay-detail-date", metadata.date_submitted()),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|value| (i18n.tr(key), value)))
    .collect();

    if rows.is_empty() {
        return None;
    }

    let column = rows.into_iter().fold(
        Column::new().spacing(spacing::XXS),
        |column, (label, value)| {
            column.push(
                Row::new()
                    .spacing(spacing::SM)
                    .push(
                        text(label)
                            .size(typography::CAPTION)
                            .width(Length::Fixed(sizing::DETAIL_LABEL_WIDTH)),
                    )
                    .push(text(value).size(typography::BODY_SM)),
            )
        },
    );

    Some(column.into())
}
