//! Config command - show the effective configuration

use crate::cli::ConfigCommands;
use crate::config::AlbumConfig;
use crate::AlbumError;
use ::config::ConfigError;
use std::path::Path;

type Result<T> = std::result::Result<T, AlbumError>;

/// Execute a config subcommand
///
/// # Errors
/// Returns an error if the configuration cannot be serialized or located
pub fn execute(command: &ConfigCommands, config: &AlbumConfig, path: Option<&Path>) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let toml = toml::to_string_pretty(config)
                .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;
            print!("{toml}");
        }
        ConfigCommands::Path => match path {
            Some(path) => println!("{}", path.display()),
            None => println!("{}", AlbumConfig::config_path()?.display()),
        },
    }
    Ok(())
}
