// SPDX-License-Identifier: MPL-2.0
//! Tooltip styles.
//!
//! Tooltips invert the page colors so they stand out from the sheet.

use super::is_light;
use crate::ui::design_tokens::{border, palette, radius, shadow, spacing, typography};
use iced::widget::{container, tooltip, Container, Text};
use iced::{Background, Border, Element, Theme};

pub fn tooltip_container(theme: &Theme) -> container::Style {
    let (background, text_color) = if is_light(theme) {
        (palette::GRAY_900, palette::WHITE)
    } else {
        (palette::GRAY_100, palette::GRAY_900)
    };

    container::Style {
        background: Some(Background::Color(background)),
        text_color: Some(text_color),
        border: Border {
            radius: radius::SM.into(),
            width: border::WIDTH_SM,
            color: palette::GRAY_500,
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}

/// Wraps `content` in a tooltip showing `tip`.
pub fn styled<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>,
    tip: impl Into<String>,
    position: tooltip::Position,
) -> tooltip::Tooltip<'a, Message, Theme, iced::Renderer> {
    let tip_container = Container::new(Text::new(tip.into()).size(typography::BODY_SM))
        .padding([spacing::XXS, spacing::XS])
        .style(tooltip_container);

    tooltip(content, tip_container, position).gap(spacing::XXS)
}
