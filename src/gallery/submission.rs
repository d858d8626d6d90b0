// SPDX-License-Identifier: MPL-2.0
//! The submission record and its media kind.

use super::metadata::{self, Metadata};
use std::fmt;
use std::sync::Arc;

/// Artwork file extensions for video submissions, in probe order.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "avi"];

/// Artwork file extensions for audio submissions, in probe order.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a"];

/// Artwork file extensions for image (and writing cover) submissions, in probe order.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Kind of primary media a submission carries.
///
/// The kind decides both which artwork extensions are probed and which
/// renderer branch the overlay takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaKind {
    #[default]
    Image,
    Video,
    Audio,
    Writing,
}

impl MediaKind {
    /// Maps the `medium` metadata value to a kind.
    ///
    /// Missing or unrecognized mediums fall back to [`MediaKind::Image`].
    #[must_use]
    pub fn from_medium(medium: Option<&str>) -> Self {
        match medium.map(|m| m.trim().to_ascii_lowercase()).as_deref() {
            Some("video") => MediaKind::Video,
            Some("audio") => MediaKind::Audio,
            Some("writing") => MediaKind::Writing,
            _ => MediaKind::Image,
        }
    }

    /// Artwork extensions probed for this kind, highest priority first.
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            MediaKind::Video => VIDEO_EXTENSIONS,
            MediaKind::Audio => AUDIO_EXTENSIONS,
            MediaKind::Image | MediaKind::Writing => IMAGE_EXTENSIONS,
        }
    }

    /// Whether the tile shows a play badge.
    #[must_use]
    pub fn is_playable(self) -> bool {
        matches!(self, MediaKind::Video | MediaKind::Audio)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Writing => "writing",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preview picture for a tile and poster for the overlay.
#[derive(Clone, PartialEq, Eq)]
pub enum Thumbnail {
    /// A file on the asset host.
    Asset(String),
    /// JPEG bytes encoded from a decoded video frame.
    Generated(Arc<Vec<u8>>),
}

impl Thumbnail {
    /// Returns the asset path when the thumbnail lives on the host.
    #[must_use]
    pub fn asset_path(&self) -> Option<&str> {
        match self {
            Thumbnail::Asset(path) => Some(path),
            Thumbnail::Generated(_) => None,
        }
    }
}

impl fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thumbnail::Asset(path) => f.debug_tuple("Asset").field(path).finish(),
            Thumbnail::Generated(bytes) => write!(f, "Generated({} bytes)", bytes.len()),
        }
    }
}

/// One artwork entry with its resolved media paths and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: u32,
    pub title: String,
    pub artist: String,
    pub kind: MediaKind,
    /// Path of the primary artwork on the asset host.
    pub media: String,
    pub thumbnail: Option<Thumbnail>,
    pub metadata: Metadata,
    pub folder: String,
    pub additional_images: Vec<String>,
}

impl Submission {
    /// Assembles a record, applying the display defaults for title and artist.
    #[must_use]
    pub fn new(
        id: u32,
        folder: impl Into<String>,
        metadata: Metadata,
        media: impl Into<String>,
        thumbnail: Option<Thumbnail>,
        additional_images: Vec<String>,
    ) -> Self {
        let kind = MediaKind::from_medium(metadata.medium());
        Self {
            id,
            title: metadata.title().unwrap_or(metadata::UNTITLED).to_string(),
            artist: metadata
                .artist()
                .unwrap_or(metadata::UNKNOWN_ARTIST)
                .to_string(),
            kind,
            media: media.into(),
            thumbnail,
            metadata,
            folder: folder.into(),
            additional_images,
        }
    }

    /// Picture used where an image is expected; same as the thumbnail.
    #[must_use]
    pub fn image(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref()
    }

    #[must_use]
    pub fn has_additional_images(&self) -> bool {
        !self.additional_images.is_empty()
    }

    /// Link target for the "Learn more" action.
    ///
    /// Prefers `learn` over `website` and adds `https://` when no scheme is given.
    #[must_use]
    pub fn learn_more_url(&self) -> Option<String> {
        self.metadata
            .learn()
            .or_else(|| self.metadata.website())
            .map(normalize_link)
    }
}

/// Derives the numeric id from a folder name such as `"001"`.
#[must_use]
pub fn id_from_folder(folder: &str) -> Option<u32> {
    if folder.is_empty() || !folder.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    folder.parse().ok()
}

/// Prefixes `https://` on links that carry no http(s) scheme.
#[must_use]
pub fn normalize_link(link: &str) -> String {
    let link = link.trim();
    let lower = link.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        link.to_string()
    } else {
        format!("https://{link}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(text: &str) -> Metadata {
        metadata::parse(text)
    }

    #[test]
    fn medium_maps_to_kind() {
        assert_eq!(MediaKind::from_medium(Some("video")), MediaKind::Video);
        assert_eq!(MediaKind::from_medium(Some(" Audio ")), MediaKind::Audio);
        assert_eq!(MediaKind::from_medium(Some("writing")), MediaKind::Writing);
        assert_eq!(MediaKind::from_medium(Some("image")), MediaKind::Image);
    }

    #[test]
    fn unknown_or_missing_medium_is_image() {
        assert_eq!(MediaKind::from_medium(Some("oil on canvas")), MediaKind::Image);
        assert_eq!(MediaKind::from_medium(None), MediaKind::Image);
    }

    #[test]
    fn writing_uses_image_extensions() {
        assert_eq!(MediaKind::Writing.extensions(), IMAGE_EXTENSIONS);
        assert_eq!(MediaKind::Video.extensions()[0], "mp4");
        assert_eq!(MediaKind::Audio.extensions()[0], "mp3");
    }

    #[test]
    fn new_applies_defaults() {
        let record = Submission::new(
            3,
            "003",
            metadata("medium: audio"),
            "/submissions/003/artwork.mp3",
            None,
            Vec::new(),
        );
        assert_eq!(record.title, "Untitled");
        assert_eq!(record.artist, "Unknown Artist");
        assert_eq!(record.kind, MediaKind::Audio);
        assert!(record.image().is_none());
        assert!(!record.has_additional_images());
    }

    #[test]
    fn id_parses_zero_padded_folders() {
        assert_eq!(id_from_folder("001"), Some(1));
        assert_eq!(id_from_folder("120"), Some(120));
    }

    #[test]
    fn id_rejects_non_numeric_folders() {
        assert_eq!(id_from_folder(""), None);
        assert_eq!(id_from_folder("abc"), None);
        assert_eq!(id_from_folder("-1"), None);
        assert_eq!(id_from_folder("1a"), None);
    }

    #[test]
    fn normalize_link_adds_scheme_once() {
        assert_eq!(normalize_link("example.org"), "https://example.org");
        assert_eq!(normalize_link("https://example.org"), "https://example.org");
        assert_eq!(normalize_link("http://example.org"), "http://example.org");
        assert_eq!(normalize_link("HTTPS://Example.org"), "HTTPS://Example.org");
    }

    #[test]
    fn learn_more_prefers_learn_over_website() {
        let record = Submission::new(
            1,
            "001",
            metadata("learn: artist.example\nwebsite: https://site.example"),
            "/submissions/001/artwork.jpg",
            None,
            Vec::new(),
        );
        assert_eq!(
            record.learn_more_url().as_deref(),
            Some("https://artist.example")
        );
    }

    #[test]
    fn learn_more_falls_back_to_website() {
        let record = Submission::new(
            1,
            "001",
            metadata("website: site.example"),
            "/submissions/001/artwork.jpg",
            None,
            Vec::new(),
        );
        assert_eq!(
            record.learn_more_url().as_deref(),
            Some("https://site.example")
        );
    }

    #[test]
    fn generated_thumbnail_debug_hides_bytes() {
        let thumb = Thumbnail::Generated(Arc::new(vec![0u8; 12]));
        assert_eq!(format!("{thumb:?}"), "Generated(12 bytes)");
        assert_eq!(thumb.asset_path(), None);
    }
}
