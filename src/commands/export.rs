//! Export command - write the tag table to a file

use crate::db::file::write_json;
use crate::{AlbumError, Album, output};
use std::path::Path;

type Result<T> = std::result::Result<T, AlbumError>;

/// Write the canonical tag table as pretty JSON
///
/// # Errors
/// Returns an error if the file cannot be written
pub fn execute(album: &Album, path: &Path, quiet: bool) -> Result<()> {
    write_json(path, album.tags())?;
    if !quiet {
        println!(
            "{}",
            output::ok(&format!(
                "Exported {} photo(s) to {}",
                album.tags().len(),
                path.display()
            ))
        );
    }
    Ok(())
}
