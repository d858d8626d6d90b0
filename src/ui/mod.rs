// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Views follow the Elm-style "state down, messages up" pattern: they borrow
//! what they render and report user intent as messages, never mutating state.
//!
//! # Views
//!
//! - [`gallery`] - Header and grid of submission tiles
//! - [`overlay`] - Sliding detail sheet for one submission
//!
//! # Shared Infrastructure
//!
//! - [`widgets`] - Canvas widgets (spinner, waveform, play glyph) and the scroll blocker
//! - [`styles`] - Centralized styling (buttons, containers, badges)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`notifications`] - Toasts for failures outside the grid

pub mod design_tokens;
pub mod gallery;
pub mod notifications;
pub mod overlay;
pub mod styles;
pub mod theming;
pub mod widgets;
