//! Check command - cross-check manifest, tags and statistics

use crate::manifest::ConsistencyReport;
use crate::stats::AvatarStats;
use crate::{AlbumError, Album, output};

type Result<T> = std::result::Result<T, AlbumError>;

fn section<'a>(ok: &str, problem: &str, items: impl IntoIterator<Item = &'a String>) {
    let items: Vec<&String> = items.into_iter().collect();
    if items.is_empty() {
        println!("{}", output::ok(ok));
    } else {
        println!("{}", output::problem(&format!("{problem} ({})", items.len())));
        for item in items {
            println!("{}", output::item(item));
        }
    }
}

/// Execute the check command
///
/// # Errors
/// Currently infallible; kept fallible like the other commands
pub fn execute(album: &Album, quiet: bool) -> Result<()> {
    let stats = AvatarStats::load(&album.config().stats_path());
    let report = ConsistencyReport::build(album.manifest(), album.index(), stats.as_ref());

    if quiet {
        println!("{}", if report.is_consistent() { "ok" } else { "inconsistent" });
        return Ok(());
    }

    section(
        "All tagged avatars are in the manifest",
        "Tagged avatars missing from the manifest",
        &report.missing_in_manifest,
    );
    section(
        "All manifest avatars are tagged",
        "Manifest avatars never tagged",
        &report.unused_in_tags,
    );
    if report.stats_total.is_some() {
        section(
            "All tagged avatars have statistics",
            "Tagged avatars missing from the statistics",
            &report.missing_in_stats,
        );
        section(
            "No stale statistics entries",
            "Statistics entries for untagged avatars",
            &report.extra_in_stats,
        );
    } else {
        println!("{}", output::problem("No statistics file (run 'albumtag stats')"));
    }

    println!();
    println!("  Avatars in manifest: {}", report.manifest_total);
    println!("  Avatars tagged:      {}", report.tagged_total);
    if let Some(total) = report.stats_total {
        println!("  Avatars in stats:    {total}");
    }
    println!("  Photos tagged:       {}", report.photo_total);
    Ok(())
}
