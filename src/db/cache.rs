//! Local cache store backed by sled
//!
//! Plays the role browser local storage plays for the web front end: a fast
//! copy of the last saved documents, consulted before the data files.

use super::types::{DataKind, FeedbackRecord, TagTable};
use super::{DbError, Store};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sled::{Db, Tree};
use std::path::Path;
use tracing::warn;

/// sled-backed cache holding bincode-encoded documents
pub struct CacheStore {
    db: Db,
    documents: Tree,
}

impl CacheStore {
    /// Opens or creates a cache at the specified path
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the cache database or its tree cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let db = sled::open(path)?;
        let documents = db.open_tree("documents")?;
        Ok(Self { db, documents })
    }

    /// Drop every cached document
    ///
    /// # Errors
    ///
    /// Returns `DbError` if clearing the tree fails.
    pub fn clear(&self) -> Result<(), DbError> {
        self.documents.clear()?;
        Ok(())
    }

    /// Flush pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the flush fails.
    pub fn flush(&self) -> Result<(), DbError> {
        self.db.flush()?;
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, kind: DataKind) -> Result<Option<T>, DbError> {
        let Some(bytes) = self.documents.get(kind.cache_key())? else {
            return Ok(None);
        };

        match bincode::serde::decode_from_slice(&bytes, bincode::config::standard()) {
            Ok((value, _)) => Ok(Some(value)),
            Err(e) => {
                warn!(key = kind.cache_key(), error = %e, "discarding undecodable cache entry");
                self.documents.remove(kind.cache_key())?;
                Ok(None)
            }
        }
    }

    fn put<T: Serialize + ?Sized>(&self, kind: DataKind, value: &T) -> Result<(), DbError> {
        let bytes = bincode::serde::encode_to_vec(value, bincode::config::standard())?;
        self.documents.insert(kind.cache_key(), bytes)?;
        Ok(())
    }
}

impl Store for CacheStore {
    fn load_tags(&self) -> Result<Option<TagTable>, DbError> {
        self.get(DataKind::Tags)
    }

    fn save_tags(&self, tags: &TagTable) -> Result<(), DbError> {
        self.put(DataKind::Tags, tags)
    }

    fn load_feedback(&self) -> Result<Option<Vec<FeedbackRecord>>, DbError> {
        self.get(DataKind::Feedback)
    }

    fn save_feedback(&self, records: &[FeedbackRecord]) -> Result<(), DbError> {
        self.put(DataKind::Feedback, records)
    }
}

impl Drop for CacheStore {
    fn drop(&mut self) {
        // Best-effort flush; callers needing durability call flush()
        let _ = self.db.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_cache_loads_none() {
        let dir = TempDir::new().unwrap();
        let cache = CacheStore::open(dir.path().join("cache")).unwrap();

        assert_eq!(cache.load_tags().unwrap(), None);
        assert_eq!(cache.load_feedback().unwrap(), None);
    }

    #[test]
    fn test_tags_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache");
        let mut tags = TagTable::new();
        tags.insert("a.jpg".into(), vec!["/avatars/x.png".into(), "/avatars/y.png".into()]);

        {
            let cache = CacheStore::open(&path).unwrap();
            cache.save_tags(&tags).unwrap();
            cache.flush().unwrap();
        }

        let cache = CacheStore::open(&path).unwrap();
        assert_eq!(cache.load_tags().unwrap(), Some(tags));
    }

    #[test]
    fn test_feedback_round_trip() {
        let dir = TempDir::new().unwrap();
        let cache = CacheStore::open(dir.path().join("cache")).unwrap();
        let records = vec![FeedbackRecord::for_download("great", 4)];

        cache.save_feedback(&records).unwrap();
        assert_eq!(cache.load_feedback().unwrap(), Some(records));
    }

    #[test]
    fn test_undecodable_entry_is_discarded() {
        let dir = TempDir::new().unwrap();
        let cache = CacheStore::open(dir.path().join("cache")).unwrap();
        cache
            .documents
            .insert(DataKind::Feedback.cache_key(), vec![0xff, 0xff, 0xff])
            .unwrap();

        assert_eq!(cache.load_feedback().unwrap(), None);
        assert!(
            !cache
                .documents
                .contains_key(DataKind::Feedback.cache_key())
                .unwrap()
        );
    }

    #[test]
    fn test_clear() {
        let dir = TempDir::new().unwrap();
        let cache = CacheStore::open(dir.path().join("cache")).unwrap();
        cache.save_tags(&TagTable::new()).unwrap();

        cache.clear().unwrap();
        assert_eq!(cache.load_tags().unwrap(), None);
    }
}
