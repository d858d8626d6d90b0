// SPDX-License-Identifier: MPL-2.0
//! Submission discovery and loading.
//!
//! A gallery is a tree of numbered folders on an asset host:
//!
//! ```text
//! submissions/
//!   001/metadata.txt
//!   001/artwork.jpg
//!   002/metadata.txt
//!   002/artwork.mp4
//!   002/artwork.jpg   (optional poster)
//!   002/image1.jpg    (optional extra images)
//! ```
//!
//! [`loader::load_all`] turns that tree into a list of [`Submission`]
//! records, newest folder first. The host can be a web server probed with
//! HEAD requests or a local directory; see [`source`].

pub mod layout;
pub mod loader;
pub mod metadata;
pub mod source;
pub mod submission;
pub mod thumbnail;

pub use layout::AssetLayout;
pub use loader::{load_all, LoadError, LoaderOptions};
pub use metadata::Metadata;
pub use source::{AssetHost, AssetSource, HttpSource, LocalSource, SourceError};
pub use submission::{MediaKind, Submission, Thumbnail};
pub use thumbnail::{FfmpegGrabber, FrameGrabber};
