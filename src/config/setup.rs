//! Interactive setup wizard for first-time configuration
//!
//! Runs when albumtag starts without a config file.

use super::{AlbumConfig, PhotoSource};
use config::ConfigError;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::path::{Path, PathBuf};

fn input_error(e: dialoguer::Error) -> ConfigError {
    ConfigError::Message(format!("Failed to read input: {e}"))
}

/// Interactive first-time setup - prompts for the data directory and photo source
///
/// 1. Prompts for the data directory (default: system data directory)
/// 2. Asks whether photos are local or served over HTTP, then for the location
/// 3. Asks whether to keep a local cache
/// 4. Saves the configuration to `path`
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read or the configuration
/// cannot be saved.
pub fn first_time_setup(path: &Path) -> Result<AlbumConfig, ConfigError> {
    println!("Welcome to albumtag! Let's set up your album.\n");

    let theme = ColorfulTheme::default();
    let defaults = AlbumConfig::default();

    let data_dir: String = Input::with_theme(&theme)
        .with_prompt("Data directory (tags.json, avatars.json)")
        .default(defaults.data_dir.to_string_lossy().to_string())
        .interact_text()
        .map_err(input_error)?;
    let data_dir = PathBuf::from(data_dir);

    let source = Select::with_theme(&theme)
        .with_prompt("Where are the photos?")
        .items(&["Local directory", "Remote URL"])
        .default(0)
        .interact()
        .map_err(input_error)?;

    let photo_source = if source == 0 {
        let photos_dir: String = Input::with_theme(&theme)
            .with_prompt("Photos directory")
            .default(data_dir.join("photos").to_string_lossy().to_string())
            .interact_text()
            .map_err(input_error)?;
        PhotoSource::Local {
            photos_dir: PathBuf::from(photos_dir),
        }
    } else {
        let base_url: String = Input::with_theme(&theme)
            .with_prompt("Photo base URL")
            .interact_text()
            .map_err(input_error)?;
        PhotoSource::Remote { base_url }
    };

    let cache_enabled = Confirm::with_theme(&theme)
        .with_prompt("Keep a local cache of the data files?")
        .default(true)
        .interact()
        .map_err(input_error)?;

    let config = AlbumConfig {
        avatars_dir: data_dir.join("avatars"),
        data_dir,
        photo_source,
        cache_enabled,
        ..defaults
    };

    config.save_to(path)?;

    println!("\nConfiguration saved to {}", path.display());
    Ok(config)
}
