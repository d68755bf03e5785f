//! Photo filtering for the gallery
//!
//! Two stages, each skipped when its input is empty:
//!
//! 1. **Search term**: avatars whose display name contains the term
//!    (case-insensitive) contribute every photo they are tagged in. When no
//!    avatar matches, photos whose identifier contains the term are kept
//!    instead.
//! 2. **Selected avatars**: a photo is kept if it is tagged with ANY of the
//!    selected avatars. Adding an avatar to the selection never shrinks the
//!    result.
//!
//! The result always keeps the order of the input photo list.

use crate::avatar::Normalizer;
use crate::index::TagIndex;
use crate::manifest::AvatarManifest;
use std::collections::HashSet;
use tracing::trace;

/// The filter inputs taken from the current selection state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionQuery {
    /// Free-text search term; blank means no search
    pub search_term: String,
    /// Avatars to filter by, in any form accepted by the normalizer
    pub selected_avatars: Vec<String>,
}

impl SelectionQuery {
    /// A query with only a search term
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            selected_avatars: Vec::new(),
        }
    }

    /// A query with only selected avatars
    #[must_use]
    pub fn avatars<I, S>(avatars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search_term: String::new(),
            selected_avatars: avatars.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the query leaves every photo visible
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_term.trim().is_empty() && self.selected_avatars.is_empty()
    }
}

/// Computes the visible photo list
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    normalizer: Normalizer,
}

impl FilterEngine {
    #[must_use]
    pub const fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    /// Filter `photos` by `query`
    ///
    /// Missing tags or an empty manifest narrow the result; they are never
    /// an error.
    #[must_use]
    pub fn filter(
        &self,
        photos: &[String],
        query: &SelectionQuery,
        index: &TagIndex,
        manifest: &AvatarManifest,
    ) -> Vec<String> {
        let mut keep: Option<HashSet<&str>> = None;

        let term = query.search_term.trim();
        if !term.is_empty() {
            keep = Some(Self::search_stage(photos, term, index, manifest));
        }

        if !query.selected_avatars.is_empty() {
            let selected = self.selected_stage(&query.selected_avatars, index);
            keep = Some(match keep {
                Some(current) => current.intersection(&selected).copied().collect(),
                None => selected,
            });
        }

        match keep {
            None => photos.to_vec(),
            Some(keep) => photos
                .iter()
                .filter(|photo| keep.contains(photo.as_str()))
                .cloned()
                .collect(),
        }
    }

    fn search_stage<'a>(
        photos: &'a [String],
        term: &str,
        index: &'a TagIndex,
        manifest: &AvatarManifest,
    ) -> HashSet<&'a str> {
        let matching = manifest.matching(term);
        if !matching.is_empty() {
            trace!(term, avatars = matching.len(), "search matched avatars");
            return matching
                .into_iter()
                .filter_map(|avatar| index.photos_for(avatar))
                .flatten()
                .map(String::as_str)
                .collect();
        }

        let needle = term.to_lowercase();
        trace!(term, "no avatar matched, searching photo names");
        photos
            .iter()
            .filter(|photo| photo.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    fn selected_stage<'a>(&self, selected: &[String], index: &'a TagIndex) -> HashSet<&'a str> {
        selected
            .iter()
            .filter_map(|avatar| index.photos_for(&self.normalizer.normalize(avatar)))
            .flatten()
            .map(String::as_str)
            .collect()
    }
}
