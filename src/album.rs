//! The loaded album: configuration, storage, tags, index and manifest
//!
//! ```no_run
//! use albumtag::{Album, config::AlbumConfig, search::SelectionQuery};
//! # fn example() -> Result<(), albumtag::AlbumError> {
//! let album = Album::open(AlbumConfig::load()?)?;
//! let visible = album.filter(&SelectionQuery::search("an"));
//! # Ok(())
//! # }
//! ```

use crate::avatar::Normalizer;
use crate::config::AlbumConfig;
use crate::db::{DbError, Store, TagTable, WriteThroughStore};
use crate::fetch::{FetchError, PhotoFetcher, fetcher_for};
use crate::index::TagIndex;
use crate::manifest::{AvatarManifest, enumerate_photos, ingest_tags};
use crate::search::{FilterEngine, SelectionQuery};
use crate::tagging::TaggingSession;
use tracing::info;

/// Everything a command needs, loaded once at startup
pub struct Album {
    config: AlbumConfig,
    normalizer: Normalizer,
    store: WriteThroughStore,
    tags: TagTable,
    index: TagIndex,
    manifest: AvatarManifest,
    photos: Vec<String>,
    engine: FilterEngine,
}

impl Album {
    /// Open the store and load tags, manifest and photo list
    ///
    /// Missing or malformed data files load as empty.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the storage engine fails.
    pub fn open(config: AlbumConfig) -> Result<Self, DbError> {
        let store = WriteThroughStore::open(&config.data_dir, config.cache_enabled);
        Self::with_store(config, store)
    }

    /// Load an album through an already opened store
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the storage engine fails.
    pub fn with_store(config: AlbumConfig, store: WriteThroughStore) -> Result<Self, DbError> {
        let normalizer = config.normalizer();
        let tags = ingest_tags(store.load_tags()?.unwrap_or_default(), &normalizer);
        let manifest = AvatarManifest::load(&config.manifest_path(), &normalizer);
        let photos = enumerate_photos(&config.photo_source, &tags);
        let index = TagIndex::build(&tags, &normalizer);

        info!(
            photos = photos.len(),
            tagged = tags.len(),
            avatars = manifest.len(),
            "album loaded"
        );

        Ok(Self {
            engine: FilterEngine::new(normalizer.clone()),
            config,
            normalizer,
            store,
            tags,
            index,
            manifest,
            photos,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &AlbumConfig {
        &self.config
    }

    #[must_use]
    pub const fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    #[must_use]
    pub const fn store(&self) -> &WriteThroughStore {
        &self.store
    }

    /// The tag table in canonical form
    #[must_use]
    pub const fn tags(&self) -> &TagTable {
        &self.tags
    }

    #[must_use]
    pub const fn index(&self) -> &TagIndex {
        &self.index
    }

    #[must_use]
    pub const fn manifest(&self) -> &AvatarManifest {
        &self.manifest
    }

    /// All photos, in enumeration order
    #[must_use]
    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    /// The photos visible for a query
    #[must_use]
    pub fn filter(&self, query: &SelectionQuery) -> Vec<String> {
        self.engine
            .filter(&self.photos, query, &self.index, &self.manifest)
    }

    /// Replace the tag table in memory and rebuild the index
    pub fn set_tags(&mut self, tags: TagTable) {
        self.index = TagIndex::build(&tags, &self.normalizer);
        self.tags = tags;
    }

    /// Start a tagging session over `photos`
    #[must_use]
    pub fn tagging_session(&self, photos: Vec<String>) -> TaggingSession {
        TaggingSession::new(photos, self.tags.clone(), self.normalizer.clone())
    }

    /// Fetcher for the configured photo source
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if a remote fetcher cannot be created.
    pub fn fetcher(&self) -> Result<Box<dyn PhotoFetcher>, FetchError> {
        fetcher_for(&self.config.photo_source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::AlbumFixture;

    #[test]
    fn test_open_empty_album() {
        let fixture = AlbumFixture::empty();
        let album = fixture.open();

        assert!(album.photos().is_empty());
        assert!(album.tags().is_empty());
        assert!(album.manifest().is_empty());
    }

    #[test]
    fn test_open_ingests_tags() {
        let fixture = AlbumFixture::new()
            .photo("a.jpg", &["Hà.png"])
            .photo("b.jpg", &[])
            .avatars(&["Hà.png"]);
        let album = fixture.open();

        assert_eq!(album.photos(), ["a.jpg", "b.jpg"]);
        assert_eq!(album.tags()["a.jpg"], vec!["/avatars/Ha.png".to_string()]);
        assert!(album.manifest().contains("/avatars/Ha.png"));
        assert_eq!(album.filter(&SelectionQuery::avatars(["Ha.png"])), vec!["a.jpg"]);
    }

    #[test]
    fn test_set_tags_rebuilds_index() {
        let fixture = AlbumFixture::new().photo("a.jpg", &[]).avatars(&["x.png"]);
        let mut album = fixture.open();
        assert_eq!(album.index().photo_count("/avatars/x.png"), 0);

        let mut tags = TagTable::new();
        tags.insert("a.jpg".into(), vec!["/avatars/x.png".into()]);
        album.set_tags(tags);
        assert_eq!(album.index().photo_count("/avatars/x.png"), 1);
    }
}
