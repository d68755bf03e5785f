//! Sequential tagging workflow
//!
//! A [`TaggingSession`] walks through the photo list one photo at a time.
//! Edits go to an in-memory draft; moving to another photo snapshots the
//! draft into the last-saved table (memory only), and [`TaggingSession::save`]
//! writes that table to storage.
//!
//! Whenever the session moves to a photo other than the first, the avatars of
//! the photo just before it become the suggestions for the new photo.

pub mod action;

pub use action::{ActionOutcome, ParseActionError, TagAction};

use crate::avatar::Normalizer;
use crate::db::file::write_json;
use crate::db::{DbError, Store, TagTable};
use std::path::Path;
use tracing::{debug, info};

/// State of one tagging session
#[derive(Debug, Clone)]
pub struct TaggingSession {
    photos: Vec<String>,
    position: usize,
    drafts: TagTable,
    saved: TagTable,
    persisted: TagTable,
    suggestions: Vec<String>,
    normalizer: Normalizer,
}

impl TaggingSession {
    /// Start a session over `photos` with a previously loaded tag table
    ///
    /// `tags` should already be in canonical form (see
    /// [`crate::manifest::ingest_tags`]).
    #[must_use]
    pub fn new(photos: Vec<String>, tags: TagTable, normalizer: Normalizer) -> Self {
        Self {
            photos,
            position: 0,
            drafts: tags.clone(),
            saved: tags.clone(),
            persisted: tags,
            suggestions: Vec::new(),
            normalizer,
        }
    }

    #[must_use]
    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    /// Zero-based position in the photo list
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The photo being tagged; `None` for an empty photo list
    #[must_use]
    pub fn current_photo(&self) -> Option<&str> {
        self.photos.get(self.position).map(String::as_str)
    }

    /// The draft avatar list of the current photo
    #[must_use]
    pub fn current_draft(&self) -> &[String] {
        self.current_photo()
            .and_then(|photo| self.drafts.get(photo))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Avatars suggested for the current photo
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// The last-saved table, including snapshots taken when moving
    #[must_use]
    pub const fn saved(&self) -> &TagTable {
        &self.saved
    }

    /// Move to the next photo. No-op on the last photo.
    ///
    /// Returns `true` if the session moved.
    pub fn next(&mut self) -> bool {
        if self.position + 1 >= self.photos.len() {
            return false;
        }
        self.move_to(self.position + 1);
        true
    }

    /// Move to the previous photo. No-op on the first photo.
    ///
    /// Returns `true` if the session moved.
    pub fn previous(&mut self) -> bool {
        if self.position == 0 || self.photos.is_empty() {
            return false;
        }
        self.move_to(self.position - 1);
        true
    }

    /// Move straight to a photo
    ///
    /// Returns `false` (and stays put) if the photo is not in the session.
    pub fn go_to(&mut self, photo: &str) -> bool {
        match self.photos.iter().position(|p| p == photo) {
            Some(position) => {
                self.move_to(position);
                true
            }
            None => false,
        }
    }

    fn move_to(&mut self, position: usize) {
        self.snapshot_current();
        self.position = position;
        self.suggestions = position
            .checked_sub(1)
            .and_then(|prev| self.photos.get(prev))
            .and_then(|prev| self.saved.get(prev).or_else(|| self.drafts.get(prev)))
            .cloned()
            .unwrap_or_default();
        debug!(
            position,
            suggestions = self.suggestions.len(),
            "moved to photo"
        );
    }

    fn snapshot_current(&mut self) {
        if let Some(photo) = self.photos.get(self.position) {
            let draft = self.drafts.get(photo).cloned().unwrap_or_default();
            self.saved.insert(photo.clone(), draft);
        }
    }

    fn draft_mut(&mut self) -> Option<&mut Vec<String>> {
        let photo = self.photos.get(self.position)?;
        Some(self.drafts.entry(photo.clone()).or_default())
    }

    /// Add the avatar to the current draft if absent, remove it if present
    ///
    /// An avatar from the last-saved list goes back to its saved place, so
    /// removing and re-adding it leaves the draft clean. Anything else is
    /// appended.
    ///
    /// Returns `true` if the avatar is now tagged.
    pub fn toggle(&mut self, avatar: &str) -> bool {
        let avatar = self.normalizer.normalize(avatar);
        if avatar.is_empty() {
            return false;
        }
        let saved = self
            .current_photo()
            .and_then(|photo| self.saved.get(photo))
            .cloned()
            .unwrap_or_default();
        let Some(draft) = self.draft_mut() else {
            return false;
        };

        if let Some(pos) = draft.iter().position(|a| *a == avatar) {
            draft.remove(pos);
            return false;
        }

        let insert_at = saved
            .iter()
            .position(|a| *a == avatar)
            .and_then(|saved_pos| {
                saved[saved_pos + 1..]
                    .iter()
                    .find_map(|later| draft.iter().position(|a| a == later))
            })
            .unwrap_or(draft.len());
        draft.insert(insert_at, avatar);
        true
    }

    /// Remove the avatar from the current draft
    ///
    /// Returns `true` if it was tagged.
    pub fn remove(&mut self, avatar: &str) -> bool {
        let avatar = self.normalizer.normalize(avatar);
        let Some(draft) = self.draft_mut() else {
            return false;
        };
        let before = draft.len();
        draft.retain(|a| *a != avatar);
        draft.len() != before
    }

    /// Empty the current draft
    pub fn clear_all(&mut self) {
        if let Some(draft) = self.draft_mut() {
            draft.clear();
        }
    }

    /// Append every suggested avatar not already in the draft
    ///
    /// Returns the number of avatars added.
    pub fn apply_suggestions(&mut self) -> usize {
        let suggestions = self.suggestions.clone();
        let Some(draft) = self.draft_mut() else {
            return 0;
        };
        let mut added = 0;
        for avatar in suggestions {
            if !draft.contains(&avatar) {
                draft.push(avatar);
                added += 1;
            }
        }
        added
    }

    /// Discard the suggestions for the current photo; the draft is untouched
    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
    }

    /// Whether the current photo's draft differs from its last-saved list
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.current_photo()
            .is_some_and(|photo| self.is_dirty(photo))
    }

    /// Whether anything differs from what was last written to storage
    ///
    /// Unlike [`Self::has_unsaved_changes`] this covers edits on photos the
    /// session has already moved past. A photo with no entry and one with an
    /// empty list count as the same.
    #[must_use]
    pub fn has_unpersisted_changes(&self) -> bool {
        let current = self.merged();
        let differs = |a: &TagTable, b: &TagTable| {
            a.iter().any(|(photo, avatars)| {
                b.get(photo).map(Vec::as_slice).unwrap_or_default() != avatars.as_slice()
            })
        };
        differs(&current, &self.persisted) || differs(&self.persisted, &current)
    }

    /// The last-saved table with the current draft folded in
    fn merged(&self) -> TagTable {
        let mut merged = self.saved.clone();
        if let Some(photo) = self.current_photo() {
            merged.insert(photo.to_string(), self.current_draft().to_vec());
        }
        merged
    }

    /// Whether a photo's draft differs (as an ordered list) from its last-saved list
    #[must_use]
    pub fn is_dirty(&self, photo: &str) -> bool {
        let draft = self.drafts.get(photo).map(Vec::as_slice).unwrap_or_default();
        let saved = self.saved.get(photo).map(Vec::as_slice).unwrap_or_default();
        draft != saved
    }

    /// Number of photos with at least one avatar, saved or drafted
    #[must_use]
    pub fn processed_count(&self) -> usize {
        self.photos
            .iter()
            .filter(|photo| {
                self.saved.get(*photo).is_some_and(|a| !a.is_empty())
                    || self.drafts.get(*photo).is_some_and(|a| !a.is_empty())
            })
            .count()
    }

    /// Write the last-saved table, merged with the current draft, to `store`
    ///
    /// The current draft is marked clean only once the write succeeds; a
    /// failed save leaves every draft as it was.
    ///
    /// # Returns
    /// The number of photos in the written table
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the store cannot write the table.
    pub fn save<S: Store + ?Sized>(&mut self, store: &S) -> Result<usize, DbError> {
        if self.current_photo().is_none() {
            return Ok(0);
        }

        let merged = self.merged();
        store.save_tags(&merged)?;

        let count = merged.len();
        self.persisted = merged.clone();
        self.saved = merged;
        info!(photos = count, "saved tag table");
        Ok(count)
    }

    /// Save, then write the saved table to `path` as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns `DbError` if either write fails.
    pub fn export<S: Store + ?Sized>(&mut self, path: &Path, store: &S) -> Result<(), DbError> {
        if self.photos.is_empty() {
            return Ok(());
        }
        self.save(store)?;
        write_json(path, &self.saved)?;
        info!(path = %path.display(), "exported tag table");
        Ok(())
    }

    /// Apply one action
    ///
    /// # Errors
    ///
    /// Returns `DbError` if a save or export fails. The in-memory state is
    /// kept as it was before the failed write.
    pub fn apply<S: Store + ?Sized>(
        &mut self,
        action: TagAction,
        store: &S,
    ) -> Result<ActionOutcome, DbError> {
        let outcome = match action {
            TagAction::Next => moved(self.next()),
            TagAction::Previous => moved(self.previous()),
            TagAction::Toggle(avatar) => {
                self.toggle(&avatar);
                ActionOutcome::Continue
            }
            TagAction::Remove(avatar) => {
                self.remove(&avatar);
                ActionOutcome::Continue
            }
            TagAction::ClearAll => {
                self.clear_all();
                ActionOutcome::Continue
            }
            TagAction::ApplySuggestions => {
                self.apply_suggestions();
                ActionOutcome::Continue
            }
            TagAction::ClearSuggestions => {
                self.clear_suggestions();
                ActionOutcome::Continue
            }
            TagAction::Save => ActionOutcome::Saved(self.save(store)?),
            TagAction::Export(path) => {
                self.export(&path, store)?;
                ActionOutcome::Exported(path)
            }
            TagAction::Quit => ActionOutcome::Quit,
        };
        Ok(outcome)
    }
}

const fn moved(did_move: bool) -> ActionOutcome {
    if did_move {
        ActionOutcome::Moved
    } else {
        ActionOutcome::Continue
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
