// SPDX-License-Identifier: MPL-2.0
//! Path conventions of the submissions tree.
//!
//! ```text
//! /{root}/{folder}/metadata.txt
//! /{root}/{folder}/artwork.<ext>
//! /{root}/{folder}/artwork.jpg     poster or cover art
//! /{root}/{folder}/image1.jpg ...  additional images
//! ```

use super::submission::{AUDIO_EXTENSIONS, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};

pub const METADATA_FILE: &str = "metadata.txt";
pub const ARTWORK_STEM: &str = "artwork";
pub const POSTER_FILE: &str = "artwork.jpg";
pub const ADDITIONAL_PREFIX: &str = "image";
pub const ADDITIONAL_EXTENSION: &str = "jpg";

/// Every recognized artwork extension, in discovery probe order.
pub fn all_extensions() -> impl Iterator<Item = &'static str> {
    IMAGE_EXTENSIONS
        .iter()
        .chain(VIDEO_EXTENSIONS)
        .chain(AUDIO_EXTENSIONS)
        .copied()
}

/// Builds host-relative paths under one submissions root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLayout {
    root: String,
}

impl AssetLayout {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.trim_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    #[must_use]
    pub fn file(&self, folder: &str, name: &str) -> String {
        if self.root.is_empty() {
            format!("/{folder}/{name}")
        } else {
            format!("/{}/{folder}/{name}", self.root)
        }
    }

    #[must_use]
    pub fn metadata(&self, folder: &str) -> String {
        self.file(folder, METADATA_FILE)
    }

    #[must_use]
    pub fn artwork(&self, folder: &str, extension: &str) -> String {
        self.file(folder, &format!("{ARTWORK_STEM}.{extension}"))
    }

    /// Artwork candidates for the given extensions, in order.
    pub fn artwork_candidates(&self, folder: &str, extensions: &[&str]) -> Vec<String> {
        extensions
            .iter()
            .map(|ext| self.artwork(folder, ext))
            .collect()
    }

    #[must_use]
    pub fn poster(&self, folder: &str) -> String {
        self.file(folder, POSTER_FILE)
    }

    /// `index` starts at 1.
    #[must_use]
    pub fn additional_image(&self, folder: &str, index: usize) -> String {
        self.file(
            folder,
            &format!("{ADDITIONAL_PREFIX}{index}.{ADDITIONAL_EXTENSION}"),
        )
    }
}

impl Default for AssetLayout {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SUBMISSIONS_ROOT)
    }
}

/// Default candidate folder names `001..=limit`.
pub fn numbered_folders(limit: u32) -> Vec<String> {
    (1..=limit).map(|n| format!("{n:03}")).collect()
}
