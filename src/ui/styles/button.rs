// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use super::is_light;
use crate::ui::design_tokens::{
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Theme};

/// Text link in the brand blue, underline-free like the web header.
pub fn link(theme: &Theme, status: button::Status) -> button::Style {
    let color = if is_light(theme) {
        palette::BRAND_500
    } else {
        palette::BRAND_400
    };
    let text_color = match status {
        button::Status::Hovered | button::Status::Pressed => palette::BRAND_600,
        _ => color,
    };

    button::Style {
        background: None,
        text_color,
        border: Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Primary action in the overlay ("Learn more", play/pause).
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => palette::BRAND_400,
        button::Status::Pressed => palette::BRAND_600,
        button::Status::Disabled => palette::GRAY_200,
        button::Status::Active => palette::BRAND_500,
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: palette::BRAND_600,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: if matches!(status, button::Status::Hovered) {
            shadow::MD
        } else {
            shadow::NONE
        },
        snap: true,
    }
}

/// Outlined secondary action ("Open media").
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let (text_color, hover) = if is_light(theme) {
        (palette::BRAND_500, palette::GRAY_100)
    } else {
        (palette::BRAND_400, palette::GRAY_700)
    };

    button::Style {
        background: match status {
            button::Status::Hovered | button::Status::Pressed => Some(Background::Color(hover)),
            _ => None,
        },
        text_color,
        border: Border {
            color: text_color,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Round close control in the overlay corner.
pub fn close(theme: &Theme, status: button::Status) -> button::Style {
    let (idle, hover, text_color) = if is_light(theme) {
        (palette::GRAY_100, palette::GRAY_200, palette::GRAY_900)
    } else {
        (palette::GRAY_700, palette::GRAY_500, WHITE)
    };

    button::Style {
        background: Some(Background::Color(match status {
            button::Status::Hovered | button::Status::Pressed => hover,
            _ => idle,
        })),
        text_color,
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Transparent wrapper around a gallery tile; hover lifts the tile slightly.
pub fn tile(theme: &Theme, status: button::Status) -> button::Style {
    let hovered = matches!(status, button::Status::Hovered);
    let text_color = if is_light(theme) {
        palette::GRAY_900
    } else {
        WHITE
    };

    button::Style {
        background: None,
        text_color,
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        shadow: if hovered { shadow::MD } else { shadow::NONE },
        snap: true,
    }
}
