//! Save command - apply a save request from a file or stdin

use crate::save::{handle_feedback, handle_save};
use crate::{AlbumError, Album};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

type Result<T> = std::result::Result<T, AlbumError>;

/// Execute the save command
///
/// Prints the JSON response. A response with `success: false` is also
/// returned as an error so the exit status reflects it.
///
/// # Errors
/// Returns an error if the input cannot be read or the request fails
pub fn execute(album: &Album, input: Option<&Path>, feedback: bool) -> Result<()> {
    let body = match input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body)?;
            body
        }
    };

    let response = if feedback {
        handle_feedback(album.store(), &body)
    } else {
        handle_save(album.store(), &body)
    };

    let json = serde_json::to_string(&response)
        .map_err(|e| AlbumError::InvalidInput(e.to_string()))?;
    println!("{json}");

    if response.success {
        Ok(())
    } else {
        Err(AlbumError::InvalidInput(response.message))
    }
}
