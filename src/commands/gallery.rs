//! Gallery command - list photos through the filter engine

use crate::search::{page_count, paginate};
use crate::{AlbumError, cli::FilterArgs, output, Album};

type Result<T> = std::result::Result<T, AlbumError>;

/// Execute the gallery command
///
/// # Errors
/// Returns `AlbumError::InvalidInput` for a page past the last one
pub fn execute(
    album: &Album,
    filter: &FilterArgs,
    page: usize,
    per_page: Option<usize>,
    all: bool,
    quiet: bool,
) -> Result<()> {
    let visible = album.filter(&filter.query());
    let per_page = if all {
        visible.len()
    } else {
        per_page.unwrap_or(album.config().per_page)
    };
    let pages = page_count(visible.len(), per_page);

    if visible.is_empty() {
        if !quiet {
            println!("No photos match.");
        }
        return Ok(());
    }
    if page == 0 || page > pages {
        return Err(AlbumError::InvalidInput(format!(
            "Page {page} out of range (1-{pages})"
        )));
    }

    if !quiet {
        println!(
            "{}",
            output::heading(&format!(
                "Photos {} of {} (page {page}/{pages})",
                visible.len(),
                album.photos().len()
            ))
        );
    }
    for photo in paginate(&visible, page, per_page) {
        println!(
            "{}",
            output::photo_with_avatars(photo, album.index().avatars_for(photo), quiet)
        );
    }
    Ok(())
}
