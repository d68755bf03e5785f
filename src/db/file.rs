//! Durable JSON file store
//!
//! Each document lives in its own file under the data directory and is
//! rewritten wholesale on every save.

use super::types::{DataKind, FeedbackRecord, TagTable};
use super::{DbError, Store};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// JSON documents in a data directory (`tags.json`, `feedback.json`)
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `kind`
    #[must_use]
    pub fn path(&self, kind: DataKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    fn read<T: DeserializeOwned>(&self, kind: DataKind) -> Option<T> {
        read_json(&self.path(kind))
    }

    fn write<T: Serialize + ?Sized>(&self, kind: DataKind, value: &T) -> Result<(), DbError> {
        write_json(&self.path(kind), value)
    }
}

impl Store for JsonFileStore {
    fn load_tags(&self) -> Result<Option<TagTable>, DbError> {
        Ok(self.read(DataKind::Tags))
    }

    fn save_tags(&self, tags: &TagTable) -> Result<(), DbError> {
        self.write(DataKind::Tags, tags)
    }

    fn load_feedback(&self) -> Result<Option<Vec<FeedbackRecord>>, DbError> {
        Ok(self.read(DataKind::Feedback))
    }

    fn save_feedback(&self, records: &[FeedbackRecord]) -> Result<(), DbError> {
        self.write(DataKind::Feedback, records)
    }
}

/// Read and parse a JSON document
///
/// Missing, unreadable and malformed files are all reported as `None`;
/// the latter two are logged.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "data file not found");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read data file");
            return None;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed data file");
            None
        }
    }
}

/// Write a value as pretty-printed JSON, creating parent directories
///
/// # Errors
///
/// Returns `DbError` if serialization fails or the file cannot be written.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), DbError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| DbError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| DbError::io(path, e))?;
    debug!(path = %path.display(), "wrote data file");
    Ok(())
}
