// SPDX-License-Identifier: MPL-2.0
//! Centralized styles for the gallery widgets.

pub mod button;
pub mod container;
pub mod overlay;
pub mod tooltip;

/// Whether the active Iced theme is the light one.
#[must_use]
pub fn is_light(theme: &iced::Theme) -> bool {
    !theme.extended_palette().is_dark
}
