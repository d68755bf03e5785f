//! Download command - copy selected photos into a directory

use crate::cli::FilterArgs;
use crate::db::{ESTIMATED_PHOTO_SIZE, FeedbackRecord, append_feedback};
use crate::fetch::download;
use crate::search::GallerySelection;
use crate::{AlbumError, Album, output};
use dialoguer::Confirm;
use std::path::Path;

type Result<T> = std::result::Result<T, AlbumError>;

/// Build the download selection: explicit photos, or every photo the filter shows
fn selection_for(album: &Album, filter: &FilterArgs, photos: &[String]) -> GallerySelection {
    let mut selection = GallerySelection::new(album.normalizer().clone());
    for avatar in &filter.avatars {
        let normalized = album.normalizer().normalize(avatar);
        if !selection.selected_avatars().contains(&normalized) {
            selection.toggle_avatar(avatar);
        }
    }
    if let Some(term) = &filter.search {
        selection.set_search_term(term.as_str());
    }

    if photos.is_empty() {
        selection.select_all(album.filter(&selection.query()));
    } else {
        selection.select_all(photos.iter().cloned());
    }
    selection
}

/// Execute the download command
///
/// `photos` takes precedence over `filter` when non-empty. Failed photos are
/// reported but do not fail the command.
///
/// # Errors
/// Returns an error if the destination cannot be created, the confirmation
/// prompt fails or the feedback log cannot be written
pub fn execute(
    album: &Album,
    filter: &FilterArgs,
    photos: &[String],
    output_dir: &Path,
    message: Option<&str>,
    yes: bool,
    quiet: bool,
) -> Result<()> {
    let selected: Vec<String> = selection_for(album, filter, photos)
        .selected_photos()
        .iter()
        .cloned()
        .collect();

    if selected.is_empty() {
        if !quiet {
            println!("No photos selected.");
        }
        return Ok(());
    }

    let estimate = (selected.len() as u64).saturating_mul(ESTIMATED_PHOTO_SIZE);
    if !yes && !quiet {
        let prompt = format!(
            "Download {} photo(s) (about {}) to {}?",
            selected.len(),
            output::format_size(estimate),
            output_dir.display()
        );
        if !Confirm::new().with_prompt(prompt).default(true).interact()? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let fetcher = album.fetcher()?;
    let report = download(
        fetcher.as_ref(),
        &selected,
        output_dir,
        album.config().download_delay(),
    )?;

    if quiet {
        for path in &report.saved {
            println!("{}", path.display());
        }
    } else {
        println!(
            "{}",
            output::ok(&format!(
                "Downloaded {} photo(s), {}",
                report.saved.len(),
                output::format_size(report.bytes)
            ))
        );
    }
    if !report.is_complete() {
        eprintln!(
            "{}",
            output::problem(&format!("{} photo(s) failed", report.failed.len()))
        );
        for (photo, reason) in &report.failed {
            eprintln!("{}", output::item(&format!("{photo}: {reason}")));
        }
    }

    if let Some(message) = message.filter(|m| !m.trim().is_empty()) {
        let record = FeedbackRecord::for_download(message, selected.len() as u64);
        append_feedback(album.store(), record)?;
        if !quiet {
            println!("{}", output::ok("Feedback saved"));
        }
    }
    Ok(())
}
