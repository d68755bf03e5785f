//! Stats command - regenerate or check `avatar_stats.json`

use crate::stats::AvatarStats;
use crate::{AlbumError, Album, output};

type Result<T> = std::result::Result<T, AlbumError>;

/// Execute the stats command
///
/// # Errors
/// Returns an error if the statistics file cannot be written
pub fn execute(album: &Album, check: bool, quiet: bool) -> Result<()> {
    let path = album.config().stats_path();

    if check {
        let message = match AvatarStats::load(&path) {
            None => output::problem("No statistics file"),
            Some(stats) if stats.is_stale(album.tags(), album.normalizer()) => output::problem(
                &format!("Statistics out of date (last updated {})", stats.last_updated),
            ),
            Some(stats) => output::ok(&format!(
                "Statistics up to date (last updated {})",
                stats.last_updated
            )),
        };
        println!("{message}");
        return Ok(());
    }

    let stats = AvatarStats::from_tags(album.tags(), album.normalizer());
    stats.save(&path)?;

    if !quiet {
        println!("{}", output::ok("Avatar stats updated"));
        println!("  Total photos:  {}", stats.total_photos);
        println!("  Total avatars: {}", stats.total_avatars);
        println!("  Total tags:    {}", stats.total_tags);
        println!("  Updated:       {}", stats.last_updated);
        for (avatar, count) in stats.ranked().into_iter().take(10) {
            println!("{}", output::avatar_with_count(avatar, count as usize, false));
        }
    }
    Ok(())
}
