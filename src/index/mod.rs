//! Bidirectional photo/avatar index
//!
//! Built in one pass from a [`TagTable`]:
//! - `forward`: photo → avatars tagged in it (original and normalized form)
//! - `reverse`: normalized avatar → photos it appears in
//!
//! The index is a pure cache of the tag table. It is rebuilt in full whenever
//! the table changes; tables of a few thousand photos rebuild instantly.

use crate::avatar::Normalizer;
use crate::db::TagTable;
use std::collections::{BTreeSet, HashMap, HashSet};

/// An avatar reference as stored in the tag table, with its canonical form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvatarRef {
    /// The identifier exactly as it appears in the tag table
    pub original: String,
    /// The canonical identifier used for comparisons
    pub normalized: String,
}

/// Forward and reverse lookups over a tag table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    forward: HashMap<String, Vec<AvatarRef>>,
    reverse: HashMap<String, HashSet<String>>,
}

impl TagIndex {
    /// Build the index from a tag table
    ///
    /// Every avatar identifier is normalized before it enters the reverse
    /// map. Entries that normalize to the empty string are dropped, as are
    /// repeats of an avatar already listed for the same photo.
    #[must_use]
    pub fn build(tags: &TagTable, normalizer: &Normalizer) -> Self {
        let mut forward: HashMap<String, Vec<AvatarRef>> = HashMap::with_capacity(tags.len());
        let mut reverse: HashMap<String, HashSet<String>> = HashMap::new();

        for (photo, avatars) in tags {
            let refs = forward.entry(photo.clone()).or_default();
            for original in avatars {
                let normalized = normalizer.normalize(original);
                if normalized.is_empty() || refs.iter().any(|r| r.normalized == normalized) {
                    continue;
                }
                reverse
                    .entry(normalized.clone())
                    .or_default()
                    .insert(photo.clone());
                refs.push(AvatarRef {
                    original: original.clone(),
                    normalized,
                });
            }
        }

        Self { forward, reverse }
    }

    /// Photos tagged with the given (already normalized) avatar
    #[must_use]
    pub fn photos_for(&self, avatar: &str) -> Option<&HashSet<String>> {
        self.reverse.get(avatar)
    }

    /// Avatars tagged in a photo, in tag-table order
    #[must_use]
    pub fn avatars_for(&self, photo: &str) -> &[AvatarRef] {
        self.forward
            .get(photo)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of photos an avatar appears in
    #[must_use]
    pub fn photo_count(&self, avatar: &str) -> usize {
        self.reverse.get(avatar).map_or(0, HashSet::len)
    }

    /// All normalized avatars present in the table, sorted
    #[must_use]
    pub fn avatars(&self) -> Vec<&str> {
        let mut avatars: Vec<&str> = self.reverse.keys().map(String::as_str).collect();
        avatars.sort_unstable();
        avatars
    }

    /// Number of photos in the table
    #[must_use]
    pub fn photo_total(&self) -> usize {
        self.forward.len()
    }

    /// Tagged avatars that do not appear in `known`, sorted
    ///
    /// `known` must contain normalized identifiers.
    #[must_use]
    pub fn unmatched<'a>(&'a self, known: &HashSet<String>) -> BTreeSet<&'a str> {
        self.reverse
            .keys()
            .filter(|avatar| !known.contains(*avatar))
            .map(String::as_str)
            .collect()
    }
}
