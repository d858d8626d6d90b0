// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use super::is_light;
use crate::ui::design_tokens::{border, palette, radius, shadow};
use crate::ui::theming::ColorScheme;
use iced::widget::container;
use iced::{Background, Border, Theme};

fn scheme(theme: &Theme) -> ColorScheme {
    if is_light(theme) {
        ColorScheme::light()
    } else {
        ColorScheme::dark()
    }
}

/// Page surface behind the header and grid.
pub fn page(theme: &Theme) -> container::Style {
    let colors = scheme(theme);
    container::Style {
        background: Some(Background::Color(colors.surface_primary)),
        text_color: Some(colors.text_primary),
        ..Default::default()
    }
}

/// Neutral block shown where a preview image is not available yet.
pub fn placeholder(theme: &Theme) -> container::Style {
    let colors = scheme(theme);
    container::Style {
        background: Some(Background::Color(colors.placeholder)),
        text_color: Some(colors.text_muted),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Translucent wash over the page while the overlay is shown.
pub fn backdrop(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(scheme(theme).backdrop)),
        ..Default::default()
    }
}

/// The sliding overlay sheet with rounded top corners.
pub fn overlay_panel(theme: &Theme) -> container::Style {
    let colors = scheme(theme);
    container::Style {
        background: Some(Background::Color(colors.surface_primary)),
        text_color: Some(colors.text_primary),
        border: Border {
            radius: iced::border::Radius {
                top_left: radius::XL,
                top_right: radius::XL,
                bottom_right: radius::NONE,
                bottom_left: radius::NONE,
            },
            ..Default::default()
        },
        shadow: shadow::XL,
        ..Default::default()
    }
}

/// Scrollable block holding a written piece.
pub fn writing(theme: &Theme) -> container::Style {
    let colors = scheme(theme);
    container::Style {
        background: Some(Background::Color(colors.surface_secondary)),
        text_color: Some(colors.text_primary),
        border: Border {
            color: palette::GRAY_200,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_follows_theme_surface() {
        let light = page(&Theme::Light);
        assert_eq!(
            light.background,
            Some(Background::Color(ColorScheme::light().surface_primary))
        );
        let dark = page(&Theme::Dark);
        assert_eq!(
            dark.background,
            Some(Background::Color(ColorScheme::dark().surface_primary))
        );
    }

    #[test]
    fn overlay_panel_rounds_only_top_corners() {
        let style = overlay_panel(&Theme::Light);
        assert_eq!(style.border.radius.top_left, radius::XL);
        assert_eq!(style.border.radius.bottom_left, radius::NONE);
    }
}
