// SPDX-License-Identifier: MPL-2.0
//! Light and dark color schemes for the gallery.

use crate::ui::design_tokens::{opacity, palette};
use iced::Color;
use serde::{Deserialize, Serialize};

/// Color palette for a theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    // Surface colors
    pub surface_primary: Color,
    pub surface_secondary: Color,

    // Text colors
    pub text_primary: Color,
    pub text_muted: Color,

    /// Page wash behind the detail overlay.
    pub backdrop: Color,
    /// Tile background while a preview is missing or loading.
    pub placeholder: Color,
}

impl ColorScheme {
    /// Light theme, the gallery's white page.
    #[must_use]
    pub fn light() -> Self {
        Self {
            surface_primary: palette::WHITE,
            surface_secondary: palette::GRAY_100,

            text_primary: palette::GRAY_900,
            text_muted: palette::GRAY_500,

            backdrop: Color {
                a: opacity::BACKDROP,
                ..palette::WHITE
            },
            placeholder: palette::GRAY_200,
        }
    }

    /// Dark theme.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface_primary: palette::GRAY_900,
            surface_secondary: Color::from_rgb(0.15, 0.15, 0.17),

            text_primary: palette::WHITE,
            text_muted: palette::GRAY_400,

            backdrop: Color {
                a: opacity::BACKDROP,
                ..palette::BLACK
            },
            placeholder: palette::GRAY_700,
        }
    }
}

/// Resolved theme for the running application.
#[derive(Debug, Clone, PartialEq)]
pub struct AppTheme {
    pub colors: ColorScheme,
    pub mode: ThemeMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// For System mode, detects the actual system theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            // Light when detection fails
            ThemeMode::System => matches!(dark_light::detect(), Ok(dark_light::Mode::Dark)),
        }
    }
}

impl AppTheme {
    #[must_use]
    pub fn new(mode: ThemeMode) -> Self {
        let colors = if mode.is_dark() {
            ColorScheme::dark()
        } else {
            ColorScheme::light()
        };

        Self { colors, mode }
    }

    /// The built-in Iced theme matching this scheme.
    #[must_use]
    pub fn iced_theme(&self) -> iced::Theme {
        if self.colors == ColorScheme::dark() {
            iced::Theme::Dark
        } else {
            iced::Theme::Light
        }
    }
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_theme_has_light_surface() {
        let scheme = ColorScheme::light();
        assert!(scheme.surface_primary.r > 0.9);
    }

    #[test]
    fn dark_theme_has_dark_surface() {
        let scheme = ColorScheme::dark();
        assert!(scheme.surface_primary.r < 0.2);
    }

    #[test]
    fn backdrop_washes_toward_the_surface() {
        let light = ColorScheme::light();
        let dark = ColorScheme::dark();
        assert!(light.backdrop.r > 0.9 && light.backdrop.a < 1.0);
        assert!(dark.backdrop.r < 0.1 && dark.backdrop.a < 1.0);
    }

    #[test]
    fn theme_mode_is_dark_returns_correct_values() {
        assert!(!ThemeMode::Light.is_dark());
        assert!(ThemeMode::Dark.is_dark());
        // System mode depends on the host; it must not panic
        let _ = ThemeMode::System.is_dark();
    }

    #[test]
    fn default_theme_is_light() {
        let theme = AppTheme::default();
        assert_eq!(theme.mode, ThemeMode::Light);
        assert_eq!(theme.colors, ColorScheme::light());
    }
}
