//! Persisted data types
//!
//! These are the shapes written to and read from the data directory:
//!
//! - **`TagTable`**: photo identifier → avatar identifiers (`tags.json`)
//! - **`FeedbackRecord`**: one entry of the append-only feedback log (`feedback.json`)
//! - **`DataKind`**: which of the two persisted documents a request targets
//!
//! Field names follow the JSON documents produced by the web front end, so
//! existing data files load unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Estimated size of a single full-resolution photo, used for download feedback
pub const ESTIMATED_PHOTO_SIZE: u64 = 12 * 1024 * 1024;

/// Mapping from photo identifier to the avatars tagged in it
///
/// Keys are kept sorted so photo enumeration from the table is deterministic.
/// Avatar order inside each list is insertion order.
pub type TagTable = BTreeMap<String, Vec<String>>;

/// One feedback entry left when downloading photos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    /// When the feedback was left
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Free-text message
    #[serde(default)]
    pub message: String,
    /// Number of photos in the download
    #[serde(default)]
    pub photo_count: u64,
    /// Estimated size of the download in bytes
    #[serde(default)]
    pub total_size: u64,
}

impl FeedbackRecord {
    /// Create a record for a download of `photo_count` photos, timestamped now
    #[must_use]
    pub fn for_download(message: impl Into<String>, photo_count: u64) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
            photo_count,
            total_size: photo_count.saturating_mul(ESTIMATED_PHOTO_SIZE),
        }
    }
}

/// The persisted documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Tags,
    Feedback,
}

impl DataKind {
    /// Filename of the document inside the data directory
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Tags => "tags.json",
            Self::Feedback => "feedback.json",
        }
    }

    /// Key of the document inside the local cache
    #[must_use]
    pub const fn cache_key(self) -> &'static str {
        match self {
            Self::Tags => "album_tags",
            Self::Feedback => "album_feedback",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tags => write!(f, "tags"),
            Self::Feedback => write!(f, "feedback"),
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
