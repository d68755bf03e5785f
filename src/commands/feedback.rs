//! Feedback command - append to and list the feedback log

use crate::db::{FeedbackRecord, Store, append_feedback};
use crate::{AlbumError, Album, output};

type Result<T> = std::result::Result<T, AlbumError>;

/// Append a feedback message
///
/// # Errors
/// Returns an error if the log cannot be written
pub fn add(album: &Album, message: &str, photo_count: u64, quiet: bool) -> Result<()> {
    if message.trim().is_empty() {
        return Err(AlbumError::InvalidInput("Feedback message is empty".into()));
    }
    let count = append_feedback(album.store(), FeedbackRecord::for_download(message, photo_count))?;
    if !quiet {
        println!("{}", output::ok(&format!("Feedback saved ({count} total)")));
    }
    Ok(())
}

/// List the feedback log, oldest first
///
/// # Errors
/// Returns an error if the storage engine fails
pub fn list(album: &Album, quiet: bool) -> Result<()> {
    let records = album.store().load_feedback()?.unwrap_or_default();
    if records.is_empty() {
        if !quiet {
            println!("No feedback yet.");
        }
        return Ok(());
    }

    for record in records {
        if quiet {
            println!("{}", record.message);
        } else {
            println!(
                "{} {} photo(s), {}",
                record.timestamp.format("%Y-%m-%d %H:%M"),
                record.photo_count,
                output::format_size(record.total_size)
            );
            println!("{}", output::item(&record.message));
        }
    }
    Ok(())
}
