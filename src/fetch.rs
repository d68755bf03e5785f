//! Photo fetching
//!
//! Photos are checked and downloaded one at a time with a fixed pause
//! between requests. A failure affects only its own photo: it is logged,
//! recorded in the report, and the remaining photos are still processed.
//! Nothing is retried.

use crate::config::PhotoSource;
use reqwest::Url;
use reqwest::blocking::Client;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid base URL '{0}'")]
    InvalidUrl(String),

    #[error("Invalid photo name '{0}'")]
    InvalidName(String),
}

/// Access to photo contents by identifier
pub trait PhotoFetcher {
    /// Whether the photo can be fetched; any failure counts as absent
    fn exists(&self, photo: &str) -> bool;

    /// The photo's bytes
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the photo cannot be read or downloaded.
    fn fetch(&self, photo: &str) -> Result<Vec<u8>, FetchError>;
}

/// Reads photos from a local directory
#[derive(Debug, Clone)]
pub struct LocalFetcher {
    dir: PathBuf,
}

impl LocalFetcher {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve a photo inside the directory, refusing anything that escapes it
    fn resolve(&self, photo: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(photo);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if photo.is_empty() || !plain {
            return Err(FetchError::InvalidName(photo.to_string()));
        }
        Ok(self.dir.join(relative))
    }
}

impl PhotoFetcher for LocalFetcher {
    fn exists(&self, photo: &str) -> bool {
        self.resolve(photo).is_ok_and(|path| path.is_file())
    }

    fn fetch(&self, photo: &str) -> Result<Vec<u8>, FetchError> {
        let path = self.resolve(photo)?;
        fs::read(&path).map_err(|source| FetchError::Io { path, source })
    }
}

/// Fetches photos over HTTP from `<base_url>/<photo>`
#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    client: Client,
    base: Url,
}

impl RemoteFetcher {
    /// Create a fetcher for a base URL
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base = Url::parse(base_url).map_err(|_| FetchError::InvalidUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base })
    }

    /// URL of a photo; the name is percent-encoded as one path segment
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidName` for an empty photo name.
    pub fn url_for(&self, photo: &str) -> Result<Url, FetchError> {
        if photo.is_empty() {
            return Err(FetchError::InvalidName(photo.to_string()));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .push(photo);
        Ok(url)
    }
}

impl PhotoFetcher for RemoteFetcher {
    fn exists(&self, photo: &str) -> bool {
        let Ok(url) = self.url_for(photo) else {
            return false;
        };
        match self.client.head(url).send() {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(photo, error = %e, "photo probe failed");
                false
            }
        }
    }

    fn fetch(&self, photo: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.url_for(photo)?;
        let bytes = self.client.get(url).send()?.error_for_status()?.bytes()?;
        Ok(bytes.to_vec())
    }
}

/// Build the fetcher for a configured photo source
///
/// # Errors
///
/// Returns `FetchError` if a remote fetcher cannot be created.
pub fn fetcher_for(source: &PhotoSource) -> Result<Box<dyn PhotoFetcher>, FetchError> {
    Ok(match source {
        PhotoSource::Local { photos_dir } => Box::new(LocalFetcher::new(photos_dir)),
        PhotoSource::Remote { base_url } => Box::new(RemoteFetcher::new(base_url)?),
    })
}

/// Run `step` for each photo in order, pausing `delay` between photos
fn each_paced<'a, F>(photos: &'a [String], delay: Duration, mut step: F)
where
    F: FnMut(&'a str),
{
    for (i, photo) in photos.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            thread::sleep(delay);
        }
        step(photo.as_str());
    }
}

/// Keep only the photos the fetcher can find, preserving order
#[must_use]
pub fn probe_existing<F: PhotoFetcher + ?Sized>(
    fetcher: &F,
    photos: &[String],
    delay: Duration,
) -> Vec<String> {
    let mut existing = Vec::with_capacity(photos.len());
    each_paced(photos, delay, |photo| {
        if fetcher.exists(photo) {
            existing.push(photo.to_string());
        } else {
            debug!(photo, "photo not found, skipping");
        }
    });
    existing
}

/// Outcome of a download run
#[derive(Debug, Default)]
pub struct DownloadReport {
    /// Files written, in download order
    pub saved: Vec<PathBuf>,
    /// Photos that could not be downloaded, with the reason
    pub failed: Vec<(String, String)>,
    /// Bytes written
    pub bytes: u64,
}

impl DownloadReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Download photos into `dest`, one at a time
///
/// Each photo is written under its final path segment. Per-photo failures
/// are recorded in the report and do not stop the run.
///
/// # Errors
///
/// Returns `FetchError` only if `dest` cannot be created.
pub fn download<F: PhotoFetcher + ?Sized>(
    fetcher: &F,
    photos: &[String],
    dest: &Path,
    delay: Duration,
) -> Result<DownloadReport, FetchError> {
    fs::create_dir_all(dest).map_err(|source| FetchError::Io {
        path: dest.to_path_buf(),
        source,
    })?;

    let mut report = DownloadReport::default();
    each_paced(photos, delay, |photo| {
        match save_one(fetcher, photo, dest) {
            Ok((path, size)) => {
                debug!(photo, path = %path.display(), size, "downloaded photo");
                report.bytes += size;
                report.saved.push(path);
            }
            Err(e) => {
                warn!(photo, error = %e, "download failed");
                report.failed.push((photo.to_string(), e.to_string()));
            }
        }
    });

    info!(
        saved = report.saved.len(),
        failed = report.failed.len(),
        "download finished"
    );
    Ok(report)
}

fn save_one<F: PhotoFetcher + ?Sized>(
    fetcher: &F,
    photo: &str,
    dest: &Path,
) -> Result<(PathBuf, u64), FetchError> {
    let name = photo
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .ok_or_else(|| FetchError::InvalidName(photo.to_string()))?;

    let bytes = fetcher.fetch(photo)?;
    let path = dest.join(name);
    fs::write(&path, &bytes).map_err(|source| FetchError::Io {
        path: path.clone(),
        source,
    })?;
    Ok((path, bytes.len() as u64))
}
