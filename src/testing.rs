//! Testing utilities for albumtag
//!
//! [`AlbumFixture`] lays out a throwaway album (data directory, photos
//! directory, tag table and avatar manifest) in a temporary directory that
//! is removed when the fixture is dropped.
//!
//! Only available when compiled with `cfg(test)`.

use crate::album::Album;
use crate::config::{AlbumConfig, PhotoSource};
use crate::db::TagTable;
use crate::db::file::write_json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary album on disk
///
/// # Examples
/// ```ignore
/// let fixture = AlbumFixture::new()
///     .photo("a.jpg", &["/avatars/x.png"])
///     .avatars(&["x.png"]);
/// let album = fixture.open();
/// assert_eq!(album.photos(), ["a.jpg"]);
/// ```
pub struct AlbumFixture {
    dir: TempDir,
    tags: TagTable,
    avatars: Option<Vec<String>>,
    cache_enabled: bool,
}

impl AlbumFixture {
    /// Start an empty fixture
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            tags: TagTable::new(),
            avatars: None,
            cache_enabled: false,
        }
    }

    /// A fixture with no photos, tags or manifest
    #[must_use]
    pub fn empty() -> Self {
        Self::new()
    }

    /// Add a photo file and its tags
    ///
    /// # Panics
    /// Panics if the photo file cannot be written.
    #[must_use]
    pub fn photo(mut self, name: &str, avatars: &[&str]) -> Self {
        let photos_dir = self.photos_dir();
        fs::create_dir_all(&photos_dir).expect("Failed to create photos dir");
        fs::write(photos_dir.join(name), name.as_bytes()).expect("Failed to write photo");
        self.tags.insert(
            name.to_string(),
            avatars.iter().map(|a| (*a).to_string()).collect(),
        );
        self
    }

    /// Set the avatar manifest
    #[must_use]
    pub fn avatars(mut self, filenames: &[&str]) -> Self {
        self.avatars = Some(filenames.iter().map(|a| (*a).to_string()).collect());
        self
    }

    /// Put a sled cache in front of the data files
    #[must_use]
    pub const fn with_cache(mut self) -> Self {
        self.cache_enabled = true;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    #[must_use]
    pub fn photos_dir(&self) -> PathBuf {
        self.dir.path().join("photos")
    }

    /// Configuration pointing at the fixture's directories
    #[must_use]
    pub fn config(&self) -> AlbumConfig {
        AlbumConfig {
            data_dir: self.data_dir(),
            photo_source: PhotoSource::Local {
                photos_dir: self.photos_dir(),
            },
            avatars_dir: self.dir.path().join("avatars"),
            cache_enabled: self.cache_enabled,
            download_delay_ms: 0,
            ..AlbumConfig::default()
        }
    }

    /// Write the data files and open the album
    ///
    /// # Panics
    /// Panics if the data files cannot be written or the album cannot be opened.
    #[must_use]
    pub fn open(&self) -> Album {
        let config = self.config();
        if !self.tags.is_empty() {
            write_json(&self.data_dir().join("tags.json"), &self.tags)
                .expect("Failed to write tags");
        }
        if let Some(avatars) = &self.avatars {
            write_json(&config.manifest_path(), avatars).expect("Failed to write manifest");
        }
        Album::open(config).expect("Failed to open album")
    }
}

impl Default for AlbumFixture {
    fn default() -> Self {
        Self::new()
    }
}
