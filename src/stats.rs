//! Precomputed avatar statistics (`avatar_stats.json`)
//!
//! Derived from the tag table on demand. The file is not updated when tags
//! are saved, so it can fall behind; [`AvatarStats::is_stale`] detects that.

use crate::avatar::Normalizer;
use crate::db::file::{read_json, write_json};
use crate::db::{DbError, TagTable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Filename of the statistics file inside the data directory
pub const STATS_FILE: &str = "avatar_stats.json";

/// Photo counts per avatar plus totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarStats {
    /// Normalized avatar → number of tags referencing it
    pub avatar_counts: BTreeMap<String, u64>,
    /// Photos in the tag table
    pub total_photos: u64,
    /// Distinct avatars tagged
    pub total_avatars: u64,
    /// Tags across all photos
    pub total_tags: u64,
    /// When the statistics were computed
    pub last_updated: DateTime<Utc>,
}

impl AvatarStats {
    /// Count every tag in the table, normalizing avatar identifiers
    #[must_use]
    pub fn from_tags(tags: &TagTable, normalizer: &Normalizer) -> Self {
        let mut avatar_counts: BTreeMap<String, u64> = BTreeMap::new();
        let mut total_tags = 0;

        for avatar in tags.values().flatten() {
            let avatar = normalizer.normalize(avatar);
            if avatar.is_empty() {
                continue;
            }
            *avatar_counts.entry(avatar).or_default() += 1;
            total_tags += 1;
        }

        Self {
            total_photos: tags.len() as u64,
            total_avatars: avatar_counts.len() as u64,
            total_tags,
            avatar_counts,
            last_updated: Utc::now(),
        }
    }

    /// Load the statistics file; `None` if missing or malformed
    #[must_use]
    pub fn load(path: &Path) -> Option<Self> {
        read_json(path)
    }

    /// Write the statistics file as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), DbError> {
        write_json(path, self)
    }

    /// Whether the counts no longer match `tags`
    #[must_use]
    pub fn is_stale(&self, tags: &TagTable, normalizer: &Normalizer) -> bool {
        let fresh = Self::from_tags(tags, normalizer);
        self.avatar_counts != fresh.avatar_counts
            || self.total_photos != fresh.total_photos
            || self.total_tags != fresh.total_tags
    }

    /// Avatars ordered by descending count, then name
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .avatar_counts
            .iter()
            .map(|(avatar, count)| (avatar.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}
