//! Gallery selection state
//!
//! Ephemeral per-session state: the search term, the avatars being filtered
//! by and the photos picked for download. Nothing here is persisted.

use super::filter::SelectionQuery;
use crate::avatar::Normalizer;
use std::collections::BTreeSet;

/// Search term, selected avatars and selected photos of a gallery session
#[derive(Debug, Clone, Default)]
pub struct GallerySelection {
    normalizer: Normalizer,
    search_term: String,
    avatars: Vec<String>,
    photos: BTreeSet<String>,
}

impl GallerySelection {
    #[must_use]
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Selected avatars in selection order (normalized)
    #[must_use]
    pub fn selected_avatars(&self) -> &[String] {
        &self.avatars
    }

    /// Add or remove an avatar from the filter
    ///
    /// Picking an avatar replaces any typed search, so the search term is
    /// cleared. Returns `true` if the avatar is now selected.
    pub fn toggle_avatar(&mut self, avatar: &str) -> bool {
        let avatar = self.normalizer.normalize(avatar);
        if avatar.is_empty() {
            return false;
        }
        self.search_term.clear();

        if let Some(pos) = self.avatars.iter().position(|a| *a == avatar) {
            self.avatars.remove(pos);
            false
        } else {
            self.avatars.push(avatar);
            true
        }
    }

    /// Selected photos, sorted
    #[must_use]
    pub const fn selected_photos(&self) -> &BTreeSet<String> {
        &self.photos
    }

    /// Add or remove a photo from the download selection
    ///
    /// Returns `true` if the photo is now selected.
    pub fn toggle_photo(&mut self, photo: &str) -> bool {
        if self.photos.remove(photo) {
            false
        } else {
            self.photos.insert(photo.to_string());
            true
        }
    }

    /// Select every currently visible photo
    pub fn select_all<I, S>(&mut self, visible: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.photos.extend(visible.into_iter().map(Into::into));
    }

    /// Clear search, avatar filter and photo selection
    pub fn clear(&mut self) {
        self.search_term.clear();
        self.avatars.clear();
        self.photos.clear();
    }

    /// The filter query for the current state
    #[must_use]
    pub fn query(&self) -> SelectionQuery {
        SelectionQuery {
            search_term: self.search_term.clone(),
            selected_avatars: self.avatars.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_avatar_normalizes_and_clears_search() {
        let mut selection = GallerySelection::default();
        selection.set_search_term("an");

        assert!(selection.toggle_avatar("x.png"));
        assert_eq!(selection.search_term(), "");
        assert_eq!(selection.selected_avatars(), ["/avatars/x.png"]);

        assert!(!selection.toggle_avatar("/avatars/x.png"));
        assert!(selection.selected_avatars().is_empty());
    }

    #[test]
    fn test_toggle_empty_avatar_is_ignored() {
        let mut selection = GallerySelection::default();
        selection.set_search_term("keep");

        assert!(!selection.toggle_avatar("  "));
        assert_eq!(selection.search_term(), "keep");
    }

    #[test]
    fn test_photo_selection() {
        let mut selection = GallerySelection::default();

        assert!(selection.toggle_photo("b.jpg"));
        selection.select_all(["a.jpg", "b.jpg"]);
        assert_eq!(selection.selected_photos().len(), 2);

        assert!(!selection.toggle_photo("b.jpg"));
        assert!(selection.selected_photos().contains("a.jpg"));
    }

    #[test]
    fn test_clear_and_query() {
        let mut selection = GallerySelection::default();
        selection.toggle_avatar("x.png");
        selection.set_search_term("term");
        selection.toggle_photo("a.jpg");

        let query = selection.query();
        assert_eq!(query.search_term, "term");
        assert_eq!(query.selected_avatars, vec!["/avatars/x.png"]);

        selection.clear();
        assert!(selection.query().is_empty());
        assert!(selection.selected_photos().is_empty());
    }
}
