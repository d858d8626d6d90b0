// SPDX-License-Identifier: MPL-2.0
//! Discovers submission folders on an asset host and turns them into records.
//!
//! The loader never fails as a whole. A folder that cannot be turned into a
//! [`Submission`] is logged with its [`LoadError`] and left out.

use super::layout::{self, AssetLayout};
use super::metadata;
use super::source::{first_existing, AssetSource, SourceError};
use super::submission::{id_from_folder, MediaKind, Submission, Thumbnail};
use super::thumbnail::FrameGrabber;
use crate::config::{self, Config};
use futures_util::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Why a folder was left out of the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("metadata unavailable: {0}")]
    MissingMetadata(SourceError),

    #[error("metadata file is empty")]
    EmptyMetadata,

    #[error("no artwork with a recognized {0} extension")]
    NoArtwork(MediaKind),

    #[error("folder name is not a number")]
    InvalidFolderName,

    #[error("id {0} is already taken by another folder")]
    DuplicateId(u32),
}

/// Knobs for one loader run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    pub layout: AssetLayout,
    /// Explicit candidate folders; empty means `001..=scan_limit`.
    pub folders: Vec<String>,
    pub scan_limit: u32,
    pub max_additional_images: usize,
    pub max_concurrent_folders: usize,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            layout: AssetLayout::default(),
            folders: Vec::new(),
            scan_limit: config::DEFAULT_SCAN_LIMIT,
            max_additional_images: config::DEFAULT_MAX_ADDITIONAL_IMAGES,
            max_concurrent_folders: config::DEFAULT_MAX_CONCURRENT_FOLDERS,
        }
    }
}

impl LoaderOptions {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            layout: AssetLayout::new(config.gallery.root()),
            folders: config.gallery.folders.clone(),
            scan_limit: config.gallery.scan_limit(),
            max_additional_images: config.gallery.max_additional_images(),
            max_concurrent_folders: config.loader.max_concurrent_folders(),
        }
    }

    /// The folder names probed during discovery.
    #[must_use]
    pub fn candidates(&self) -> Vec<String> {
        if self.folders.is_empty() {
            layout::numbered_folders(self.scan_limit)
        } else {
            self.folders.clone()
        }
    }

    fn concurrency(&self) -> usize {
        self.max_concurrent_folders.max(1)
    }
}

/// Returns the candidate folders that hold metadata and some artwork,
/// sorted by name, descending.
pub async fn discover<S: AssetSource>(source: &S, options: &LoaderOptions) -> Vec<String> {
    let layout = &options.layout;

    let mut found: Vec<String> = stream::iter(options.candidates())
        .map(|folder| async move {
            is_submission_folder(source, layout, &folder)
                .await
                .then_some(folder)
        })
        .buffer_unordered(options.concurrency())
        .filter_map(std::future::ready)
        .collect()
        .await;

    sort_descending(&mut found);
    tracing::debug!(count = found.len(), "discovered submission folders");
    found
}

async fn is_submission_folder<S: AssetSource>(
    source: &S,
    layout: &AssetLayout,
    folder: &str,
) -> bool {
    if !source.exists(&layout.metadata(folder)).await {
        return false;
    }
    let candidates: Vec<String> = layout::all_extensions()
        .map(|ext| layout.artwork(folder, ext))
        .collect();
    first_existing(source, candidates).await.is_some()
}

/// Builds the record for one folder.
pub async fn load_submission<S, G>(
    source: &S,
    grabber: &G,
    layout: &AssetLayout,
    folder: &str,
    max_additional_images: usize,
) -> Result<Submission, LoadError>
where
    S: AssetSource,
    G: FrameGrabber,
{
    let id = id_from_folder(folder).ok_or(LoadError::InvalidFolderName)?;

    let text = source
        .fetch_text(&layout.metadata(folder))
        .await
        .map_err(LoadError::MissingMetadata)?;
    if text.trim().is_empty() {
        return Err(LoadError::EmptyMetadata);
    }
    let metadata = metadata::parse(&text);
    let kind = MediaKind::from_medium(metadata.medium());

    let media = first_existing(source, layout.artwork_candidates(folder, kind.extensions()))
        .await
        .ok_or(LoadError::NoArtwork(kind))?;

    let thumbnail = resolve_thumbnail(source, grabber, layout, folder, kind, &media).await;
    let additional_images =
        additional_images(source, layout, folder, max_additional_images).await;

    Ok(Submission::new(
        id,
        folder,
        metadata,
        media,
        thumbnail,
        additional_images,
    ))
}

async fn resolve_thumbnail<S, G>(
    source: &S,
    grabber: &G,
    layout: &AssetLayout,
    folder: &str,
    kind: MediaKind,
    media: &str,
) -> Option<Thumbnail>
where
    S: AssetSource,
    G: FrameGrabber,
{
    match kind {
        MediaKind::Image | MediaKind::Writing => Some(Thumbnail::Asset(media.to_string())),
        MediaKind::Audio => {
            let poster = layout.poster(folder);
            source.exists(&poster).await.then_some(Thumbnail::Asset(poster))
        }
        MediaKind::Video => {
            let poster = layout.poster(folder);
            if source.exists(&poster).await {
                return Some(Thumbnail::Asset(poster));
            }
            match grabber.grab(&source.locate(media)).await {
                Ok(bytes) => Some(Thumbnail::Generated(Arc::new(bytes))),
                Err(err) => {
                    tracing::warn!(folder, error = %err, "video thumbnail generation failed");
                    None
                }
            }
        }
    }
}

/// Probes `image1.jpg`, `image2.jpg`, ... until the first gap.
async fn additional_images<S: AssetSource>(
    source: &S,
    layout: &AssetLayout,
    folder: &str,
    max: usize,
) -> Vec<String> {
    let mut images = Vec::new();
    for index in 1..=max {
        let path = layout.additional_image(folder, index);
        if !source.exists(&path).await {
            break;
        }
        images.push(path);
    }
    images
}

/// Discovers and loads every submission, newest folder first.
pub async fn load_all<S, G>(source: &S, grabber: &G, options: &LoaderOptions) -> Vec<Submission>
where
    S: AssetSource,
    G: FrameGrabber,
{
    let folders = discover(source, options).await;
    let layout = &options.layout;
    let max_additional = options.max_additional_images;

    let results: Vec<(String, Result<Submission, LoadError>)> = stream::iter(folders)
        .map(|folder| async move {
            let result = load_submission(source, grabber, layout, &folder, max_additional).await;
            (folder, result)
        })
        .buffer_unordered(options.concurrency())
        .collect()
        .await;

    let submissions = collect_submissions(results);
    tracing::info!(count = submissions.len(), "loaded submissions");
    submissions
}

/// Sorts results by folder, logs skipped folders, and drops duplicate ids.
fn collect_submissions(mut results: Vec<(String, Result<Submission, LoadError>)>) -> Vec<Submission> {
    results.sort_by(|(a, _), (b, _)| b.cmp(a));

    let mut seen = HashSet::new();
    let mut submissions = Vec::with_capacity(results.len());

    for (folder, result) in results {
        let outcome = result.and_then(|submission| {
            if seen.insert(submission.id) {
                Ok(submission)
            } else {
                Err(LoadError::DuplicateId(submission.id))
            }
        });

        match outcome {
            Ok(submission) => submissions.push(submission),
            Err(err @ LoadError::MissingMetadata(_)) => {
                tracing::debug!(folder = %folder, error = %err, "skipping folder");
            }
            Err(err) => {
                tracing::warn!(folder = %folder, error = %err, "skipping folder");
            }
        }
    }

    submissions
}

fn sort_descending(folders: &mut [String]) {
    folders.sort_by(|a, b| b.cmp(a));
}
