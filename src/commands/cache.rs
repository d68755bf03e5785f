//! Cache command - drop the local cache

use crate::cli::CacheCommands;
use crate::{AlbumError, Album, output};

type Result<T> = std::result::Result<T, AlbumError>;

/// Execute a cache subcommand
///
/// # Errors
/// Returns an error if the cache cannot be cleared
pub fn execute(album: &Album, command: &CacheCommands, quiet: bool) -> Result<()> {
    match command {
        CacheCommands::Clear => {
            let cleared = album.store().clear_cache()?;
            if !quiet {
                let message = if cleared {
                    output::ok("Local cache cleared; data files will be read on next load")
                } else {
                    output::problem("Local cache is disabled; nothing to clear")
                };
                println!("{message}");
            }
        }
    }
    Ok(())
}
