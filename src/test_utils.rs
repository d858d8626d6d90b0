// SPDX-License-Identifier: MPL-2.0
//! Test doubles for asset hosts and frame grabbers.

use crate::error::{Error, Result};
use crate::gallery::source::{AssetSource, SourceError};
use crate::gallery::thumbnail::FrameGrabber;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory asset host that records every existence probe.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
    probed: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file; the path is host-relative, e.g. `/submissions/001/metadata.txt`.
    pub fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.to_string(), content.into());
        self
    }

    pub fn probe_count(&self) -> usize {
        self.probed.lock().map(|p| p.len()).unwrap_or_default()
    }

    pub fn probed(&self) -> Vec<String> {
        self.probed.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl AssetSource for MemorySource {
    async fn exists(&self, path: &str) -> bool {
        if let Ok(mut probed) = self.probed.lock() {
            probed.push(path.to_string());
        }
        self.files.contains_key(path)
    }

    async fn fetch_text(&self, path: &str) -> std::result::Result<String, SourceError> {
        let bytes = self.fetch_bytes(path).await?;
        String::from_utf8(bytes).map_err(|e| SourceError::Io(e.to_string()))
    }

    async fn fetch_bytes(&self, path: &str) -> std::result::Result<Vec<u8>, SourceError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(path.to_string()))
    }

    fn locate(&self, path: &str) -> String {
        format!("memory://{path}")
    }
}

/// Frame grabber that counts calls and returns a canned result.
#[derive(Debug, Default)]
pub struct CountingGrabber {
    calls: AtomicUsize,
    frame: Option<Vec<u8>>,
}

impl CountingGrabber {
    /// A grabber that always fails.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn returning(frame: Vec<u8>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            frame: Some(frame),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FrameGrabber for CountingGrabber {
    async fn grab(&self, locator: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.frame
            .clone()
            .ok_or_else(|| Error::Thumbnail(format!("no frame for {locator}")))
    }
}
