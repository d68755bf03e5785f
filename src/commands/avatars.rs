//! Avatars command - list the manifest with photo counts

use crate::{AlbumError, Album, output};

type Result<T> = std::result::Result<T, AlbumError>;

/// Execute the avatars command
///
/// # Errors
/// Currently infallible; kept fallible like the other commands
pub fn execute(album: &Album, filter: Option<&str>, by_count: bool, quiet: bool) -> Result<()> {
    let mut avatars: Vec<(&str, usize)> = match filter {
        Some(term) => album.manifest().matching(term),
        None => album.manifest().iter().collect(),
    }
    .into_iter()
    .map(|avatar| (avatar, album.index().photo_count(avatar)))
    .collect();

    if avatars.is_empty() {
        if !quiet {
            println!("No avatars found.");
        }
        return Ok(());
    }

    if by_count {
        avatars.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    }

    if !quiet {
        println!("{}", output::heading(&format!("{} avatar(s)", avatars.len())));
    }
    for (avatar, count) in avatars {
        println!("{}", output::avatar_with_count(avatar, count, quiet));
    }
    Ok(())
}
