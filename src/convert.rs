//! One-off conversion of avatar names to plain ASCII
//!
//! Brings data written before ASCII filenames were required in line with
//! the canonical form: the avatar manifest, the tag table, the statistics
//! file and the avatar image files themselves.

use crate::avatar::{Normalizer, transliterate_filename};
use crate::db::TagTable;
use crate::stats::AvatarStats;
use chrono::Utc;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Transliterate every manifest entry, keeping order and duplicates
#[must_use]
pub fn convert_manifest(filenames: &[String]) -> Vec<String> {
    filenames.iter().map(|name| transliterate_filename(name)).collect()
}

fn convert_avatar(avatar: &str, normalizer: &Normalizer) -> String {
    normalizer.normalize(&transliterate_filename(normalizer.filename(avatar)))
}

/// Transliterate and normalize every avatar in the tag table
///
/// Photo identifiers are left alone. Avatars that convert to the same name
/// within one photo are kept once, at the first position.
#[must_use]
pub fn convert_tags(tags: &TagTable, normalizer: &Normalizer) -> TagTable {
    tags.iter()
        .map(|(photo, avatars)| {
            let mut converted: Vec<String> = Vec::with_capacity(avatars.len());
            for avatar in avatars {
                let avatar = convert_avatar(avatar, normalizer);
                if !avatar.is_empty() && !converted.contains(&avatar) {
                    converted.push(avatar);
                }
            }
            (photo.clone(), converted)
        })
        .collect()
}

/// Re-key the statistics by converted avatar
///
/// A key that several old keys convert to is recounted from `tags` (the
/// converted table) when given, since one photo may have carried both
/// spellings. Without a table the old counts are added up.
#[must_use]
pub fn convert_stats(
    stats: &AvatarStats,
    tags: Option<&TagTable>,
    normalizer: &Normalizer,
) -> AvatarStats {
    let mut merged: BTreeMap<String, (u64, usize)> = BTreeMap::new();
    for (avatar, count) in &stats.avatar_counts {
        let entry = merged
            .entry(convert_avatar(avatar, normalizer))
            .or_default();
        entry.0 += count;
        entry.1 += 1;
    }

    let recount = |avatar: &str| -> u64 {
        tags.map_or(0, |tags| {
            tags.values()
                .filter(|avatars| avatars.iter().any(|a| a == avatar))
                .count() as u64
        })
    };

    let avatar_counts: BTreeMap<String, u64> = merged
        .into_iter()
        .map(|(avatar, (count, sources))| {
            let count = if sources > 1 && tags.is_some() {
                recount(&avatar)
            } else {
                count
            };
            (avatar, count)
        })
        .collect();

    AvatarStats {
        total_avatars: avatar_counts.len() as u64,
        total_tags: avatar_counts.values().sum(),
        avatar_counts,
        last_updated: Utc::now(),
        ..stats.clone()
    }
}

/// A pending file rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Files in `dir` whose names are not plain ASCII, with their target names
///
/// Files whose target already exists are skipped with a warning. A missing
/// directory yields an empty plan.
#[must_use]
pub fn plan_renames(dir: &Path) -> Vec<Rename> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "cannot read avatar directory");
            return Vec::new();
        }
    };

    let mut plan: Vec<Rename> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            let ascii = transliterate_filename(&name);
            if ascii == name {
                return None;
            }
            let to = dir.join(&ascii);
            if to.exists() {
                warn!(from = %name, to = %ascii, "target exists, not renaming");
                return None;
            }
            Some(Rename {
                from: entry.path(),
                to,
            })
        })
        .collect();
    plan.sort_by(|a, b| a.from.cmp(&b.from));
    plan
}

/// Perform the renames in order
///
/// # Errors
///
/// Returns the first I/O error; renames before it have already happened.
pub fn apply_renames(plan: &[Rename]) -> io::Result<usize> {
    for rename in plan {
        fs::rename(&rename.from, &rename.to)?;
    }
    Ok(plan.len())
}
