// SPDX-License-Identifier: MPL-2.0
//! `iced_gallery` is a desktop viewer for the "Coping with Art" gallery, built
//! with the Iced GUI framework.
//!
//! Submissions are numbered folders on a web host or local directory. The
//! [`gallery`] module discovers and loads them and [`ui`] renders the grid
//! and the detail overlay. [`media_player`] plays video and audio inside the
//! overlay, and [`app`] wires everything into an Iced application.

#![doc(html_root_url = "https://docs.rs/iced_gallery/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod media_player;
pub mod ui;

#[cfg(test)]
mod test_utils;
