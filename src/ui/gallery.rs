// SPDX-License-Identifier: MPL-2.0
//! Landing page: header, then the grid of submission tiles.
//!
//! The view is stateless. Selection, preview bytes, and scroll position all
//! live in the application; a tile click only reports the submission id.

use crate::config::{NARROW_COLUMNS, WIDE_COLUMNS, WIDE_LAYOUT_MIN_WIDTH};
use crate::gallery::{MediaKind, Submission};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::{scroll_blocker, AnimatedSpinner, PlayGlyph, Waveform};
use iced::widget::image::{self, Handle};
use iced::widget::scrollable::{RelativeOffset, Viewport};
use iced::widget::{button, container, text, Column, Container, Id, Row, Scrollable, Space, Stack};
use iced::{alignment, ContentFit, Element, Length};
use std::collections::HashMap;
use std::time::Duration;

/// Id of the page scrollable, used to restore the offset after the overlay closes.
pub const SCROLLABLE_ID: &str = "gallery-page";

#[derive(Debug, Clone)]
pub enum Message {
    /// A tile was clicked.
    Selected(u32),
    OpenSubmitForm,
    Reload,
    Scrolled(RelativeOffset),
}

/// Everything the page needs to render one frame.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub submissions: &'a [Submission],
    /// Decoded previews keyed by submission id.
    pub previews: &'a HashMap<u32, Handle>,
    pub loading: bool,
    /// Time since the current load started, drives the spinner.
    pub loading_elapsed: Duration,
    pub window_width: f32,
    /// While true, wheel input never reaches the page.
    pub scroll_locked: bool,
}

/// Number of grid columns for a window `width` in logical pixels.
#[must_use]
pub fn columns_for_width(width: f32) -> usize {
    if width >= WIDE_LAYOUT_MIN_WIDTH {
        WIDE_COLUMNS
    } else {
        NARROW_COLUMNS
    }
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let body: Element<'_, Message> = if ctx.loading {
        loading_state(ctx.i18n, ctx.loading_elapsed)
    } else if ctx.submissions.is_empty() {
        empty_state(ctx.i18n)
    } else {
        grid(&ctx)
    };

    let page = Column::new()
        .spacing(spacing::XL)
        .padding(spacing::LG)
        .push(header(ctx.i18n))
        .push(body);

    let scrollable = Scrollable::new(page)
        .id(Id::new(SCROLLABLE_ID))
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(|viewport: Viewport| Message::Scrolled(viewport.relative_offset()));

    Container::new(scroll_blocker(scrollable, ctx.scroll_locked))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::page)
        .into()
}

fn header(i18n: &I18n) -> Element<'_, Message> {
    let title_line = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(text(i18n.tr("gallery-title")).size(typography::TITLE_MD))
        .push(text(i18n.tr("gallery-separator")).size(typography::TITLE_MD));

    let submit = button(text(i18n.tr("gallery-submit")).size(typography::BODY_LG))
        .padding(0)
        .on_press(Message::OpenSubmitForm)
        .style(styles::button::link);

    Column::new()
        .spacing(spacing::SM)
        .max_width(sizing::HEADER_MAX_WIDTH)
        .push(title_line)
        .push(text(i18n.tr("gallery-statement")).size(typography::BODY_LG))
        .push(submit)
        .into()
}

fn loading_state(i18n: &I18n, elapsed: Duration) -> Element<'_, Message> {
    let content = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(AnimatedSpinner::after(palette::BRAND_500, elapsed).into_element())
        .push(text(i18n.tr("gallery-loading")).size(typography::BODY));

    Container::new(content)
        .width(Length::Fill)
        .padding(spacing::XXL)
        .align_x(alignment::Horizontal::Center)
        .into()
}

fn empty_state(i18n: &I18n) -> Element<'_, Message> {
    let reload = button(text(i18n.tr("gallery-reload")).size(typography::BODY))
        .padding([spacing::XS, spacing::MD])
        .on_press(Message::Reload)
        .style(styles::button::primary);

    let content = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(text(i18n.tr("gallery-empty")).size(typography::BODY_LG))
        .push(reload);

    Container::new(content)
        .width(Length::Fill)
        .padding(spacing::XXL)
        .align_x(alignment::Horizontal::Center)
        .into()
}

fn grid<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let columns = columns_for_width(ctx.window_width);

    let rows = ctx.submissions.chunks(columns).map(|chunk| {
        let mut row = Row::new().spacing(spacing::LG);
        for submission in chunk {
            row = row.push(tile(
                ctx.i18n,
                submission,
                ctx.previews.get(&submission.id),
            ));
        }
        // Keep tile widths equal on a short last row
        for _ in chunk.len()..columns {
            row = row.push(Space::new().width(Length::FillPortion(1)));
        }
        row.into()
    });

    Column::with_children(rows).spacing(spacing::XL).into()
}

/// Caption under a tile, e.g. "Still Life by Jane Doe".
#[must_use]
pub fn caption(i18n: &I18n, submission: &Submission) -> String {
    i18n.tr_with_args(
        "gallery-caption",
        &[
            ("title", submission.title.as_str()),
            ("artist", submission.artist.as_str()),
        ],
    )
}

fn tile<'a>(
    i18n: &I18n,
    submission: &'a Submission,
    preview: Option<&Handle>,
) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::XS)
        .push(tile_preview(submission, preview))
        .push(text(caption(i18n, submission)).size(typography::BODY_SM));

    button(content)
        .padding(0)
        .width(Length::FillPortion(1))
        .on_press(Message::Selected(submission.id))
        .style(styles::button::tile)
        .into()
}

/// Picture area of a tile, with the play badge on time-based media.
fn tile_preview<'a>(submission: &Submission, preview: Option<&Handle>) -> Element<'a, Message> {
    let height = Length::Fixed(sizing::TILE_PREVIEW_HEIGHT);

    let base: Element<'a, Message> = match preview {
        Some(handle) => image::Image::new(handle.clone())
            .width(Length::Fill)
            .height(height)
            .content_fit(ContentFit::Cover)
            .into(),
        None => missing_preview(submission, height),
    };

    if submission.kind.is_playable() {
        Stack::new()
            .width(Length::Fill)
            .height(height)
            .push(base)
            .push(centered(play_badge()))
            .into()
    } else {
        base
    }
}

/// Stand-in shown when no preview bytes are available.
fn missing_preview<'a>(submission: &Submission, height: Length) -> Element<'a, Message> {
    let inner: Element<'a, Message> = match submission.kind {
        // Audio without cover art: decorative waveform
        MediaKind::Audio if submission.thumbnail.is_none() => {
            Waveform::new().into_element(sizing::WAVEFORM_HEIGHT)
        }
        // Video without poster: muted play glyph
        MediaKind::Video if submission.thumbnail.is_none() => {
            PlayGlyph::new(palette::GRAY_400).into_element(sizing::ICON_XL)
        }
        // Preview still being fetched
        _ => Space::new().into(),
    };

    Container::new(inner)
        .width(Length::Fill)
        .height(height)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::placeholder)
        .into()
}

/// Round dark badge with a white play triangle.
pub fn play_badge<'a, M: 'static>() -> Element<'a, M> {
    Container::new(PlayGlyph::new(palette::WHITE).into_element(sizing::ICON_MD))
        .width(Length::Fixed(sizing::PLAY_BADGE))
        .height(Length::Fixed(sizing::PLAY_BADGE))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::overlay::play_badge)
        .into()
}

fn centered<'a, M: 'static>(content: Element<'a, M>) -> Element<'a, M> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}
