//! Manifest sources.
//!
//! The normalizer never performs I/O itself; it is handed a `ManifestSource`
//! that produces the raw catalog. This module centralizes the sources the
//! crate ships (live HTTP, JSON fixture on disk, in-memory list, disk cache)
//! and how source kinds map from CLI strings, so callers do not hard-code
//! them.

use crate::manifest::RawManifest;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::env;
use std::env::VarError;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;

/// Vendor endpoint listing every supported platform.
pub const DEFAULT_PLATFORMS_URL: &str = "https://saucelabs.com/rest/v1/info/platforms/all";

const ENV_PLATFORMS_URL: &str = "SAUCE_PLATFORMS_URL";
const ENV_CACHE_PATH: &str = "SAUCE_BROWSERS_CACHE";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Produces the raw, already-parsed catalog.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawManifest>>;
}

#[async_trait]
impl<T: ManifestSource + ?Sized> ManifestSource for Box<T> {
    async fn fetch(&self) -> Result<Vec<RawManifest>> {
        (**self).fetch().await
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Live,
    File,
    Static,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Live => "live",
            SourceKind::File => "file",
            SourceKind::Static => "static",
        }
    }
}

impl TryFrom<&str> for SourceKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "live" => Ok(SourceKind::Live),
            "file" => Ok(SourceKind::File),
            "static" => Ok(SourceKind::Static),
            other => bail!("Unknown source: {other}"),
        }
    }
}

/// Fixed list, for tests and pre-parsed fixtures.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    manifests: Vec<RawManifest>,
}

impl StaticSource {
    pub fn new(manifests: Vec<RawManifest>) -> Self {
        Self { manifests }
    }
}

#[async_trait]
impl ManifestSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<RawManifest>> {
        Ok(self.manifests.clone())
    }
}

/// JSON array of manifests on disk.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ManifestSource for FileSource {
    async fn fetch(&self) -> Result<Vec<RawManifest>> {
        let data = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading manifest fixture {}", self.path.display()))?;
        crate::parse_manifest_list(&data)
            .with_context(|| format!("parsing manifest fixture {}", self.path.display()))
    }
}

/// Live catalog over HTTP.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("sauce-browsers/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Source for `SAUCE_PLATFORMS_URL`, or the vendor endpoint.
    pub fn from_env() -> Result<Self> {
        Self::new(platforms_url_from_env().unwrap_or_else(|| DEFAULT_PLATFORMS_URL.to_string()))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ManifestSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<RawManifest>> {
        tracing::debug!(url = %self.url, "fetching platform catalog");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("requesting {}", self.url))?;
        let status = response.status();
        if !status.is_success() {
            bail!("{} returned status {status}", self.url);
        }
        response
            .json::<Vec<RawManifest>>()
            .await
            .with_context(|| format!("decoding platform catalog from {}", self.url))
    }
}

/// Wraps a source with a JSON file cache.
///
/// A present cache file is returned as-is; otherwise the inner source is
/// fetched and its result persisted before returning. A failed cache write
/// is logged and the fetched list is still returned.
pub struct CachedSource<S> {
    inner: S,
    path: PathBuf,
}

impl<S: ManifestSource> CachedSource<S> {
    pub fn new(inner: S, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
        }
    }

    fn persist(&self, manifests: &[RawManifest]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating cache directory {}", dir.display()))?;
        let mut file = NamedTempFile::new_in(&dir)
            .with_context(|| format!("creating temp file in {}", dir.display()))?;
        serde_json::to_writer_pretty(&mut file, manifests).context("serializing cache")?;
        file.write_all(b"\n").context("writing cache")?;
        file.persist(&self.path)
            .with_context(|| format!("persisting cache {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl<S: ManifestSource> ManifestSource for CachedSource<S> {
    async fn fetch(&self) -> Result<Vec<RawManifest>> {
        if self.path.is_file() {
            tracing::debug!(path = %self.path.display(), "using cached platform catalog");
            return FileSource::new(&self.path).fetch().await;
        }
        let manifests = self.inner.fetch().await?;
        if let Err(err) = self.persist(&manifests) {
            tracing::warn!(
                path = %self.path.display(),
                error = %format!("{err:#}"),
                "failed to write platform catalog cache"
            );
        }
        Ok(manifests)
    }
}

pub fn platforms_url_from_env() -> Option<String> {
    env_non_empty(ENV_PLATFORMS_URL)
}

pub fn cache_path_from_env() -> Option<PathBuf> {
    env_non_empty(ENV_CACHE_PATH).map(PathBuf::from)
}

fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        Ok(_) => None,
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(os)) => Some(os.to_string_lossy().into_owned()),
    }
}
