// SPDX-License-Identifier: MPL-2.0
//! Custom widgets used by the gallery views.

pub mod animated_spinner;
pub mod play_badge;
pub mod scroll_blocker;
pub mod waveform;

pub use animated_spinner::AnimatedSpinner;
pub use play_badge::PlayGlyph;
pub use scroll_blocker::scroll_blocker;
pub use waveform::Waveform;
