// SPDX-License-Identifier: MPL-2.0
//! Asset hosts and the existence checker.
//!
//! Every asset is addressed by a host-relative path such as
//! `/submissions/001/artwork.jpg`. A host either serves those paths over HTTP
//! or maps them onto a local directory with the same layout.
//!
//! Existence probes fail closed: any transport problem reads as "absent".

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("IcedGallery/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects followed per request.
const MAX_REDIRECTS: usize = 10;

/// Transport-level failure while talking to an asset host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("unexpected status {status} for {path}")]
    Status { path: String, status: u16 },

    #[error("network failure: {0}")]
    Network(String),

    #[error("I/O failure: {0}")]
    Io(String),
}

/// A place gallery assets can be probed and fetched from.
pub trait AssetSource: Send + Sync {
    /// Returns `true` only when `path` positively exists.
    fn exists(&self, path: &str) -> impl Future<Output = bool> + Send;

    /// Fetches `path` as text. Invalid UTF-8 is replaced, not rejected.
    fn fetch_text(&self, path: &str) -> impl Future<Output = Result<String, SourceError>> + Send;

    /// Fetches the raw bytes of `path`.
    fn fetch_bytes(&self, path: &str)
        -> impl Future<Output = Result<Vec<u8>, SourceError>> + Send;

    /// Absolute URL or filesystem path for handing `path` to FFmpeg or the
    /// system opener.
    fn locate(&self, path: &str) -> String;
}

/// Probes `candidates` in order and returns the first one that exists.
pub async fn first_existing<S, I>(source: &S, candidates: I) -> Option<String>
where
    S: AssetSource,
    I: IntoIterator<Item = String>,
    I::IntoIter: Send,
{
    for candidate in candidates {
        if source.exists(&candidate).await {
            return Some(candidate);
        }
    }
    None
}

// =============================================================================
// HTTP
// =============================================================================

/// Asset host reached over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base: String,
}

impl HttpSource {
    /// Builds a client for `base`. Without a timeout the transport default applies.
    pub fn new(base: impl Into<String>, timeout: Option<Duration>) -> Result<Self, SourceError> {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base: base.into().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Joins a host-relative path onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, SourceError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl AssetSource for HttpSource {
    async fn exists(&self, path: &str) -> bool {
        match self.client.head(self.url(path)).send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(err) => {
                tracing::debug!(path, error = %err, "HEAD probe failed");
                false
            }
        }
    }

    async fn fetch_text(&self, path: &str) -> Result<String, SourceError> {
        self.get(path)
            .await?
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))
    }

    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        let bytes = self
            .get(path)
            .await?
            .bytes()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn locate(&self, path: &str) -> String {
        self.url(path)
    }
}

// =============================================================================
// Local directory
// =============================================================================

/// Asset host backed by a local directory with the same layout as the web root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a host-relative path below the root directory.
    #[must_use]
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

fn io_error(path: &str, err: &std::io::Error) -> SourceError {
    if err.kind() == std::io::ErrorKind::NotFound {
        SourceError::NotFound(path.to_string())
    } else {
        SourceError::Io(format!("{path}: {err}"))
    }
}

impl AssetSource for LocalSource {
    async fn exists(&self, path: &str) -> bool {
        match tokio::fs::metadata(self.resolve(path)).await {
            Ok(metadata) => metadata.is_file(),
            Err(_) => false,
        }
    }

    async fn fetch_text(&self, path: &str) -> Result<String, SourceError> {
        let bytes = self.fetch_bytes(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        tokio::fs::read(self.resolve(path))
            .await
            .map_err(|e| io_error(path, &e))
    }

    fn locate(&self, path: &str) -> String {
        self.resolve(path).to_string_lossy().into_owned()
    }
}

// =============================================================================
// Host selection
// =============================================================================

/// The asset host the application talks to.
#[derive(Debug, Clone)]
pub enum AssetHost {
    Http(HttpSource),
    Local(LocalSource),
}

impl AssetHost {
    /// Picks HTTP for `http://`/`https://` locations and a directory otherwise.
    pub fn from_location(location: &str, timeout: Option<Duration>) -> Result<Self, SourceError> {
        let lower = location.trim().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(AssetHost::Http(HttpSource::new(location.trim(), timeout)?))
        } else {
            Ok(AssetHost::Local(LocalSource::new(location.trim())))
        }
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, AssetHost::Http(_))
    }
}

impl fmt::Display for AssetHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetHost::Http(source) => f.write_str(source.base()),
            AssetHost::Local(source) => write!(f, "{}", source.root().display()),
        }
    }
}

impl AssetSource for AssetHost {
    async fn exists(&self, path: &str) -> bool {
        match self {
            AssetHost::Http(source) => source.exists(path).await,
            AssetHost::Local(source) => source.exists(path).await,
        }
    }

    async fn fetch_text(&self, path: &str) -> Result<String, SourceError> {
        match self {
            AssetHost::Http(source) => source.fetch_text(path).await,
            AssetHost::Local(source) => source.fetch_text(path).await,
        }
    }

    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        match self {
            AssetHost::Http(source) => source.fetch_bytes(path).await,
            AssetHost::Local(source) => source.fetch_bytes(path).await,
        }
    }

    fn locate(&self, path: &str) -> String {
        match self {
            AssetHost::Http(source) => source.locate(path),
            AssetHost::Local(source) => source.locate(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves a handful of fixed routes on a loopback port and returns the
    /// base URL.
    async fn serve_fixed_routes() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut request = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&chunk[..n]),
                        }
                    }

                    let head = String::from_utf8_lossy(&request);
                    let mut request_line = head.split_whitespace();
                    let method = request_line.next().unwrap_or_default().to_string();
                    let path = request_line.next().unwrap_or_default().to_string();

                    let (status, body) = match path.as_str() {
                        "/submissions/001/metadata.txt" => ("200 OK", "title: Still Life"),
                        "/submissions/002/metadata.txt" => ("204 No Content", ""),
                        "/submissions/003/metadata.txt" => ("500 Internal Server Error", "down"),
                        _ => ("404 Not Found", ""),
                    };

                    let mut response = format!("HTTP/1.1 {status}\r\nConnection: close\r\n");
                    if !status.starts_with("204") {
                        response.push_str(&format!("Content-Length: {}\r\n", body.len()));
                    }
                    response.push_str("\r\n");
                    if method != "HEAD" {
                        response.push_str(body);
                    }

                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        format!("http://{addr}")
    }

    fn http_source(base: String) -> HttpSource {
        HttpSource::new(base, Some(Duration::from_secs(5))).expect("client")
    }

    #[tokio::test]
    async fn local_exists_only_for_regular_files() {
        let dir = tempdir().expect("temp dir");
        fs::create_dir_all(dir.path().join("submissions/001")).expect("mkdir");
        fs::write(dir.path().join("submissions/001/metadata.txt"), "title: A").expect("write");
        let source = LocalSource::new(dir.path());

        assert!(source.exists("/submissions/001/metadata.txt").await);
        assert!(!source.exists("/submissions/001").await);
        assert!(!source.exists("/submissions/001/artwork.jpg").await);
    }

    #[tokio::test]
    async fn local_fetch_text_reports_missing_as_not_found() {
        let dir = tempdir().expect("temp dir");
        let source = LocalSource::new(dir.path());

        let err = source
            .fetch_text("/submissions/002/metadata.txt")
            .await
            .expect_err("missing file");
        assert_eq!(
            err,
            SourceError::NotFound("/submissions/002/metadata.txt".to_string())
        );
    }

    #[tokio::test]
    async fn local_fetch_text_replaces_invalid_utf8() {
        let dir = tempdir().expect("temp dir");
        fs::write(dir.path().join("metadata.txt"), b"title: Caf\xe9\nartist: Ana").expect("write");
        let source = LocalSource::new(dir.path());

        let text = source.fetch_text("/metadata.txt").await.expect("lossy text");
        assert_eq!(text, "title: Caf\u{fffd}\nartist: Ana");
    }

    #[tokio::test]
    async fn local_fetch_bytes_reads_content() {
        let dir = tempdir().expect("temp dir");
        fs::write(dir.path().join("blob.bin"), [1u8, 2, 3]).expect("write");
        let source = LocalSource::new(dir.path());

        let bytes = source.fetch_bytes("/blob.bin").await.expect("bytes");
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[test]
    fn local_locate_is_below_root() {
        let source = LocalSource::new("/srv/gallery");
        assert_eq!(
            PathBuf::from(source.locate("/submissions/001/artwork.mp4")),
            PathBuf::from("/srv/gallery/submissions/001/artwork.mp4")
        );
    }

    #[test]
    fn http_url_joins_without_double_slash() {
        let source = HttpSource::new("https://gallery.example/", None).expect("client");
        assert_eq!(
            source.url("/submissions/001/metadata.txt"),
            "https://gallery.example/submissions/001/metadata.txt"
        );
    }

    #[test]
    fn from_location_selects_host_kind() {
        let http = AssetHost::from_location("HTTPS://gallery.example", None).expect("http");
        assert!(http.is_remote());

        let local = AssetHost::from_location("./public", None).expect("local");
        assert!(!local.is_remote());
        assert_eq!(local.to_string(), "./public");
    }

    #[tokio::test]
    async fn unreachable_http_host_fails_closed() {
        let source = HttpSource::new("http://127.0.0.1:1", Some(Duration::from_secs(2)))
            .expect("client");

        assert!(!source.exists("/submissions/001/metadata.txt").await);
        let err = source
            .fetch_text("/submissions/001/metadata.txt")
            .await
            .expect_err("no server");
        assert!(matches!(err, SourceError::Network(_)));
    }

    #[tokio::test]
    async fn http_exists_only_for_ok() {
        let source = http_source(serve_fixed_routes().await);

        assert!(source.exists("/submissions/001/metadata.txt").await);
        assert!(!source.exists("/submissions/002/metadata.txt").await);
        assert!(!source.exists("/submissions/003/metadata.txt").await);
        assert!(!source.exists("/submissions/004/metadata.txt").await);
    }

    #[tokio::test]
    async fn http_fetch_reads_successful_responses() {
        let source = http_source(serve_fixed_routes().await);

        let text = source
            .fetch_text("/submissions/001/metadata.txt")
            .await
            .expect("metadata");
        assert_eq!(text, "title: Still Life");

        let empty = source
            .fetch_bytes("/submissions/002/metadata.txt")
            .await
            .expect("no content is still a success");
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn http_fetch_maps_failed_statuses() {
        let source = http_source(serve_fixed_routes().await);

        let missing = source
            .fetch_text("/submissions/004/metadata.txt")
            .await
            .expect_err("404");
        assert_eq!(
            missing,
            SourceError::NotFound("/submissions/004/metadata.txt".to_string())
        );

        let broken = source
            .fetch_bytes("/submissions/003/metadata.txt")
            .await
            .expect_err("500");
        assert_eq!(
            broken,
            SourceError::Status {
                path: "/submissions/003/metadata.txt".to_string(),
                status: 500,
            }
        );
    }

    #[tokio::test]
    async fn first_existing_respects_candidate_order() {
        let dir = tempdir().expect("temp dir");
        fs::write(dir.path().join("b.png"), b"png").expect("write");
        fs::write(dir.path().join("c.gif"), b"gif").expect("write");
        let source = LocalSource::new(dir.path());

        let found = first_existing(
            &source,
            vec!["/a.jpg".to_string(), "/b.png".to_string(), "/c.gif".to_string()],
        )
        .await;
        assert_eq!(found.as_deref(), Some("/b.png"));

        let none = first_existing(&source, vec!["/z.jpg".to_string()]).await;
        assert!(none.is_none());
    }
}
