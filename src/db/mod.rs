//! Persistence for the tag table and feedback log
//!
//! Provides a single [`Store`] interface with two implementations:
//! - [`JsonFileStore`]: durable JSON documents in the data directory
//! - [`CacheStore`]: sled-backed local cache of the same documents
//!
//! [`WriteThroughStore`] composes the two: the cache is consulted first on
//! load and refreshed on every save, while the JSON files stay authoritative.

use std::path::Path;
use tracing::{debug, info, warn};

pub mod cache;
pub mod error;
pub mod file;
pub mod types;

pub use cache::CacheStore;
pub use error::DbError;
pub use file::JsonFileStore;
pub use types::{DataKind, ESTIMATED_PHOTO_SIZE, FeedbackRecord, TagTable};

/// Read/write access to the persisted documents
///
/// Loads return `Ok(None)` when a document is absent or unreadable; only
/// saves and storage-engine failures are errors.
pub trait Store {
    /// Load the tag table
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the storage engine itself fails.
    fn load_tags(&self) -> Result<Option<TagTable>, DbError>;

    /// Replace the tag table
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the table cannot be serialized or written.
    fn save_tags(&self, tags: &TagTable) -> Result<(), DbError>;

    /// Load the feedback log
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the storage engine itself fails.
    fn load_feedback(&self) -> Result<Option<Vec<FeedbackRecord>>, DbError>;

    /// Replace the feedback log
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the log cannot be serialized or written.
    fn save_feedback(&self, records: &[FeedbackRecord]) -> Result<(), DbError>;
}

/// Durable store fronted by an optional local cache
pub struct WriteThroughStore {
    durable: JsonFileStore,
    cache: Option<CacheStore>,
}

impl WriteThroughStore {
    /// Compose a durable store with an optional cache
    #[must_use]
    pub const fn new(durable: JsonFileStore, cache: Option<CacheStore>) -> Self {
        Self { durable, cache }
    }

    /// Open the store for a data directory
    ///
    /// When `cache_enabled` is set, the cache lives in `<data_dir>/cache`. A
    /// cache that cannot be opened is logged and skipped.
    #[must_use]
    pub fn open(data_dir: &Path, cache_enabled: bool) -> Self {
        let cache = if cache_enabled {
            match CacheStore::open(data_dir.join("cache")) {
                Ok(cache) => Some(cache),
                Err(e) => {
                    warn!(error = %e, "local cache unavailable, using data files only");
                    None
                }
            }
        } else {
            None
        };
        Self::new(JsonFileStore::new(data_dir), cache)
    }

    /// The durable JSON store
    #[must_use]
    pub const fn durable(&self) -> &JsonFileStore {
        &self.durable
    }

    /// The local cache, if enabled
    #[must_use]
    pub const fn cache(&self) -> Option<&CacheStore> {
        self.cache.as_ref()
    }

    /// Drop every cached document so the next load reads the data files
    ///
    /// Returns `false` when caching is disabled.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the cache cannot be cleared or flushed.
    pub fn clear_cache(&self) -> Result<bool, DbError> {
        let Some(cache) = &self.cache else {
            return Ok(false);
        };
        cache.clear()?;
        cache.flush()?;
        info!("local cache cleared");
        Ok(true)
    }

    fn cached<T>(&self, load: impl Fn(&CacheStore) -> Result<Option<T>, DbError>) -> Option<T> {
        let cache = self.cache.as_ref()?;
        match load(cache) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "local cache read failed");
                None
            }
        }
    }

    fn refresh_cache(&self, save: impl Fn(&CacheStore) -> Result<(), DbError>) {
        if let Some(cache) = &self.cache
            && let Err(e) = save(cache)
        {
            warn!(error = %e, "local cache write failed");
        }
    }
}

impl Store for WriteThroughStore {
    fn load_tags(&self) -> Result<Option<TagTable>, DbError> {
        if let Some(tags) = self.cached(CacheStore::load_tags) {
            debug!(photos = tags.len(), "tag table served from local cache");
            return Ok(Some(tags));
        }

        let tags = self.durable.load_tags()?;
        if let Some(tags) = &tags {
            self.refresh_cache(|cache| cache.save_tags(tags));
        }
        Ok(tags)
    }

    fn save_tags(&self, tags: &TagTable) -> Result<(), DbError> {
        self.durable.save_tags(tags)?;
        self.refresh_cache(|cache| cache.save_tags(tags));
        Ok(())
    }

    fn load_feedback(&self) -> Result<Option<Vec<FeedbackRecord>>, DbError> {
        if let Some(records) = self.cached(CacheStore::load_feedback) {
            return Ok(Some(records));
        }

        let records = self.durable.load_feedback()?;
        if let Some(records) = &records {
            self.refresh_cache(|cache| cache.save_feedback(records));
        }
        Ok(records)
    }

    fn save_feedback(&self, records: &[FeedbackRecord]) -> Result<(), DbError> {
        self.durable.save_feedback(records)?;
        self.refresh_cache(|cache| cache.save_feedback(records));
        Ok(())
    }
}

/// Append one record to the feedback log
///
/// The log is read in full, extended and written back in full.
///
/// # Returns
/// The number of records in the log after the append
///
/// # Errors
///
/// Returns `DbError` if the log cannot be written.
pub fn append_feedback<S: Store + ?Sized>(
    store: &S,
    record: FeedbackRecord,
) -> Result<usize, DbError> {
    let mut records = store.load_feedback()?.unwrap_or_default();
    records.push(record);
    store.save_feedback(&records)?;
    Ok(records.len())
}
