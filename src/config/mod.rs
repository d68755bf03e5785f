//! Configuration module for albumtag
//!
//! Settings live in `~/.config/albumtag/config.toml` and can be overridden
//! with `ALBUMTAG_*` environment variables (nested keys use `__`, for example
//! `ALBUMTAG_PHOTO_SOURCE__BASE_URL`). The loaded [`AlbumConfig`] is passed
//! explicitly to everything that needs it.

mod setup;

pub use setup::first_time_setup;

use crate::avatar::{DEFAULT_AVATAR_PREFIX, Normalizer};
use crate::search::DEFAULT_PER_PAGE;
use crate::stats::STATS_FILE;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "ALBUMTAG";

/// Filename of the avatar manifest inside the data directory
pub const MANIFEST_FILE: &str = "avatars.json";

/// Where photos come from
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PhotoSource {
    /// A local directory of image files
    Local { photos_dir: PathBuf },
    /// An HTTP endpoint serving photos by filename
    Remote { base_url: String },
}

impl Default for PhotoSource {
    fn default() -> Self {
        Self::Local {
            photos_dir: PathBuf::from("photos"),
        }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AlbumConfig {
    /// Directory holding `tags.json`, `feedback.json`, `avatars.json`,
    /// `avatar_stats.json` and the local cache
    pub data_dir: PathBuf,

    /// Where photos are listed and fetched from
    pub photo_source: PhotoSource,

    /// Directory holding the avatar image files
    pub avatars_dir: PathBuf,

    /// Canonical directory prefix of avatar identifiers
    pub avatar_prefix: String,

    /// Keep a local cache of the data files
    pub cache_enabled: bool,

    /// Pause between sequential fetches, in milliseconds
    pub download_delay_ms: u64,

    /// Photos per gallery page
    pub per_page: usize,

    /// Suppress informational output by default
    pub quiet: bool,

    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for AlbumConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("albumtag");
        Self {
            avatars_dir: data_dir.join("avatars"),
            data_dir,
            photo_source: PhotoSource::default(),
            avatar_prefix: DEFAULT_AVATAR_PREFIX.to_string(),
            cache_enabled: true,
            download_delay_ms: 100,
            per_page: DEFAULT_PER_PAGE,
            quiet: false,
            log_level: "warn".to_string(),
        }
    }
}

impl AlbumConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("albumtag").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults (plus environment overrides).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or an override cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, applying environment overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or an override cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn build(path: &Path, environment: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(environment)
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration, running first-time setup if the file doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if path.exists() {
            Self::load_from(&path)
        } else {
            first_time_setup(&path)
        }
    }

    /// Save configuration to `path` as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Normalizer for the configured avatar prefix
    #[must_use]
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(&self.avatar_prefix)
    }

    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.data_dir.join(MANIFEST_FILE)
    }

    #[must_use]
    pub fn stats_path(&self) -> PathBuf {
        self.data_dir.join(STATS_FILE)
    }

    #[must_use]
    pub const fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }
}
