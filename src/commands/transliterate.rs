//! Transliterate command - convert avatar names in the data files to ASCII

use crate::convert::{apply_renames, convert_manifest, convert_stats, convert_tags, plan_renames};
use crate::db::Store;
use crate::db::file::{read_json, write_json};
use crate::stats::AvatarStats;
use crate::{AlbumError, Album, output};

type Result<T> = std::result::Result<T, AlbumError>;

fn report(quiet: bool, dry_run: bool, what: &str, changed: usize) {
    if quiet {
        return;
    }
    let verb = if dry_run { "Would convert" } else { "Converted" };
    println!("{}", output::ok(&format!("{verb} {changed} {what}")));
}

/// Execute the transliterate command
///
/// The manifest, tag table and statistics are converted in place. With
/// `rename_files`, avatar image files in the avatars directory are renamed
/// to match.
///
/// # Errors
/// Returns an error if a converted file cannot be written or a rename fails
pub fn execute(album: &Album, rename_files: bool, dry_run: bool, quiet: bool) -> Result<()> {
    let config = album.config();
    let normalizer = album.normalizer();

    let manifest_path = config.manifest_path();
    if let Some(filenames) = read_json::<Vec<String>>(&manifest_path) {
        let converted = convert_manifest(&filenames);
        let changed = filenames.iter().zip(&converted).filter(|(a, b)| a != b).count();
        if !dry_run {
            write_json(&manifest_path, &converted)?;
        }
        report(quiet, dry_run, "manifest entries", changed);
    }

    let store = album.store();
    let mut converted_tags = None;
    if let Some(tags) = store.load_tags()? {
        let converted = convert_tags(&tags, normalizer);
        let changed = tags
            .iter()
            .filter(|(photo, avatars)| converted.get(*photo) != Some(*avatars))
            .count();
        if !dry_run {
            store.save_tags(&converted)?;
        }
        report(quiet, dry_run, "tagged photos", changed);
        converted_tags = Some(converted);
    }

    let stats_path = config.stats_path();
    if let Some(stats) = AvatarStats::load(&stats_path) {
        let converted = convert_stats(&stats, converted_tags.as_ref(), normalizer);
        if !dry_run {
            converted.save(&stats_path)?;
        }
        report(quiet, dry_run, "statistics entries", stats.avatar_counts.len());
    }

    if rename_files {
        let plan = plan_renames(&config.avatars_dir);
        for rename in &plan {
            if !quiet {
                println!(
                    "{}",
                    output::item(&format!("{} -> {}", rename.from.display(), rename.to.display()))
                );
            }
        }
        if dry_run {
            report(quiet, dry_run, "avatar files", plan.len());
        } else {
            let renamed = apply_renames(&plan)?;
            report(quiet, dry_run, "avatar files", renamed);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::AlbumFixture;
    use std::fs;

    #[test]
    fn test_converts_manifest_and_tags() {
        let fixture = AlbumFixture::new()
            .photo("a.jpg", &["/avatars/Hà.png"])
            .avatars(&["Hà.png", "Bình.png"]);
        let album = fixture.open();

        execute(&album, false, false, true).unwrap();

        let manifest: Vec<String> = read_json(&album.config().manifest_path()).unwrap();
        assert_eq!(manifest, vec!["Ha.png", "Binh.png"]);
        let tags = album.store().load_tags().unwrap().unwrap();
        assert_eq!(tags["a.jpg"], vec!["/avatars/Ha.png".to_string()]);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let fixture = AlbumFixture::new().avatars(&["Hà.png"]);
        let album = fixture.open();
        let avatars_dir = &album.config().avatars_dir;
        fs::create_dir_all(avatars_dir).unwrap();
        fs::write(avatars_dir.join("Hà.png"), b"img").unwrap();

        execute(&album, true, true, true).unwrap();

        let manifest: Vec<String> = read_json(&album.config().manifest_path()).unwrap();
        assert_eq!(manifest, vec!["Hà.png"]);
        assert!(avatars_dir.join("Hà.png").exists());
    }

    #[test]
    fn test_renames_avatar_files() {
        let fixture = AlbumFixture::new();
        let album = fixture.open();
        let avatars_dir = &album.config().avatars_dir;
        fs::create_dir_all(avatars_dir).unwrap();
        fs::write(avatars_dir.join("Hà.png"), b"img").unwrap();

        execute(&album, true, false, true).unwrap();

        assert!(avatars_dir.join("Ha.png").exists());
        assert!(!avatars_dir.join("Hà.png").exists());
    }
}
