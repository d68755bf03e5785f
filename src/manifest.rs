//! Avatar manifest, photo enumeration and consistency checks
//!
//! The avatar manifest is a JSON array of avatar filenames. Photos are either
//! listed from a local directory or, for a remote photo source, taken from the
//! keys of the tag table.

use crate::avatar::{Normalizer, display_name, transliterate_filename};
use crate::config::PhotoSource;
use crate::db::TagTable;
use crate::db::file::read_json;
use crate::index::TagIndex;
use crate::stats::AvatarStats;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use tracing::{debug, warn};

/// File extensions recognised as photos (compared case-insensitively)
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// The known avatars, as canonical identifiers in manifest order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvatarManifest {
    avatars: Vec<String>,
    known: HashSet<String>,
}

impl AvatarManifest {
    /// Build a manifest from avatar filenames or paths
    ///
    /// Each entry is transliterated to ASCII and normalized. Empty entries
    /// and duplicates are dropped; the first occurrence keeps its position.
    pub fn from_filenames<I, S>(filenames: I, normalizer: &Normalizer) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut manifest = Self::default();
        for entry in filenames {
            let ascii = transliterate_filename(normalizer.filename(entry.as_ref()));
            let avatar = normalizer.normalize(&ascii);
            if !avatar.is_empty() && manifest.known.insert(avatar.clone()) {
                manifest.avatars.push(avatar);
            }
        }
        manifest
    }

    /// Load the manifest file (`avatars.json`)
    ///
    /// A missing or malformed file yields an empty manifest.
    #[must_use]
    pub fn load(path: &Path, normalizer: &Normalizer) -> Self {
        let filenames: Vec<String> = read_json(path).unwrap_or_default();
        let manifest = Self::from_filenames(filenames, normalizer);
        debug!(avatars = manifest.len(), path = %path.display(), "loaded avatar manifest");
        manifest
    }

    /// Avatars in manifest order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.avatars.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.avatars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.avatars.is_empty()
    }

    /// Whether a normalized avatar identifier is in the manifest
    #[must_use]
    pub fn contains(&self, avatar: &str) -> bool {
        self.known.contains(avatar)
    }

    /// The set of normalized identifiers
    #[must_use]
    pub const fn known(&self) -> &HashSet<String> {
        &self.known
    }

    /// Avatars whose display name contains `term`, case-insensitively
    #[must_use]
    pub fn matching(&self, term: &str) -> Vec<&str> {
        let needle = term.to_lowercase();
        self.iter()
            .filter(|avatar| display_name(avatar).to_lowercase().contains(&needle))
            .collect()
    }
}

/// Outcome of resolving typed input to a manifest avatar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarMatch<'a> {
    /// Exactly one avatar fits
    Found(&'a str),
    /// Several avatars fit; the input needs to be more specific
    Ambiguous(Vec<&'a str>),
    /// No avatar fits
    Unknown,
}

impl AvatarManifest {
    /// Resolve user input (a path, filename or part of a name) to one avatar
    ///
    /// Tried in order: the normalized input itself, a case-insensitive exact
    /// display name, then a unique display-name substring match.
    #[must_use]
    pub fn resolve(&self, input: &str, normalizer: &Normalizer) -> AvatarMatch<'_> {
        let input = input.trim();
        let ascii = transliterate_filename(normalizer.filename(input));
        let normalized = normalizer.normalize(&ascii);
        if let Some(avatar) = self.avatars.iter().find(|a| **a == normalized) {
            return AvatarMatch::Found(avatar);
        }

        let wanted = ascii.to_lowercase();
        if let Some(avatar) = self
            .iter()
            .find(|avatar| display_name(avatar).to_lowercase() == wanted)
        {
            return AvatarMatch::Found(avatar);
        }

        let mut candidates = self.matching(&ascii);
        match candidates.len() {
            0 => AvatarMatch::Unknown,
            1 => AvatarMatch::Found(candidates.remove(0)),
            _ => AvatarMatch::Ambiguous(candidates),
        }
    }
}

/// Transliterate and normalize every avatar in a freshly loaded tag table
///
/// Entries that normalize to nothing are dropped, as are repeats within a
/// photo. Order is otherwise preserved.
#[must_use]
pub fn ingest_tags(tags: TagTable, normalizer: &Normalizer) -> TagTable {
    tags.into_iter()
        .map(|(photo, avatars)| {
            let mut canonical: Vec<String> = Vec::with_capacity(avatars.len());
            for avatar in avatars {
                let ascii = transliterate_filename(normalizer.filename(&avatar));
                let avatar = normalizer.normalize(&ascii);
                if !avatar.is_empty() && !canonical.contains(&avatar) {
                    canonical.push(avatar);
                }
            }
            (photo, canonical)
        })
        .collect()
}

/// List the photos available from a photo source
///
/// - `Local`: image files directly inside the photos directory, sorted by name
/// - `Remote`: the tag table keys, trusted to exist
#[must_use]
pub fn enumerate_photos(source: &PhotoSource, tags: &TagTable) -> Vec<String> {
    match source {
        PhotoSource::Remote { .. } => tags.keys().cloned().collect(),
        PhotoSource::Local { photos_dir } => list_photo_dir(photos_dir),
    }
}

fn list_photo_dir(dir: &Path) -> Vec<String> {
    let pattern = format!("{}/*", glob::Pattern::escape(&dir.to_string_lossy()));
    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot list photo directory");
            return Vec::new();
        }
    };

    let mut photos: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|path| path.is_file() && is_photo(path))
        .filter_map(|path| path.file_name()?.to_str().map(String::from))
        .collect();
    photos.sort();
    debug!(photos = photos.len(), dir = %dir.display(), "listed photo directory");
    photos
}

fn is_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            PHOTO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Cross-check of the avatar manifest, tag table and statistics file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// Tagged avatars with no manifest entry
    pub missing_in_manifest: BTreeSet<String>,
    /// Manifest avatars that no photo is tagged with
    pub unused_in_tags: Vec<String>,
    /// Tagged avatars absent from the statistics file
    pub missing_in_stats: BTreeSet<String>,
    /// Statistics entries for avatars no photo is tagged with
    pub extra_in_stats: BTreeSet<String>,
    /// Avatars in the manifest
    pub manifest_total: usize,
    /// Distinct avatars used in the tag table
    pub tagged_total: usize,
    /// Avatars in the statistics file (`None` when there is no file)
    pub stats_total: Option<usize>,
    /// Photos in the tag table
    pub photo_total: usize,
}

impl ConsistencyReport {
    /// Compare the manifest and statistics against an index of the tag table
    #[must_use]
    pub fn build(manifest: &AvatarManifest, index: &TagIndex, stats: Option<&AvatarStats>) -> Self {
        let tagged: BTreeSet<&str> = index.avatars().into_iter().collect();

        let missing_in_manifest = index
            .unmatched(manifest.known())
            .into_iter()
            .map(String::from)
            .collect();
        let unused_in_tags = manifest
            .iter()
            .filter(|avatar| !tagged.contains(avatar))
            .map(String::from)
            .collect();

        let (missing_in_stats, extra_in_stats) = stats.map_or_else(Default::default, |stats| {
            let missing = tagged
                .iter()
                .filter(|avatar| !stats.avatar_counts.contains_key(**avatar))
                .map(|avatar| (*avatar).to_string())
                .collect();
            let extra = stats
                .avatar_counts
                .keys()
                .filter(|avatar| !tagged.contains(avatar.as_str()))
                .cloned()
                .collect();
            (missing, extra)
        });

        Self {
            missing_in_manifest,
            unused_in_tags,
            missing_in_stats,
            extra_in_stats,
            manifest_total: manifest.len(),
            tagged_total: tagged.len(),
            stats_total: stats.map(|s| s.avatar_counts.len()),
            photo_total: index.photo_total(),
        }
    }

    /// Whether every cross-check passed
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.missing_in_manifest.is_empty()
            && self.missing_in_stats.is_empty()
            && self.extra_in_stats.is_empty()
    }
}
