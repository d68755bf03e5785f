//! Albumtag - a photo album tagged by the people in it
//!
//! This library indexes a photo album by "avatars" (the people tagged in each
//! photo), filters the gallery by person or search term, and drives a
//! sequential tagging workflow. Tags and feedback persist as JSON files with
//! an optional local cache in front of them.

use thiserror::Error;

pub mod album;
pub mod avatar;
pub mod cli;
pub mod commands;
pub mod config;
pub mod convert;
pub mod db;
pub mod fetch;
pub mod index;
pub mod manifest;
pub mod output;
pub mod save;
pub mod search;
pub mod stats;
pub mod tagging;

#[cfg(test)]
pub mod testing;

pub use album::Album;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum AlbumError {
    /// Storage error
    #[error("Storage error: {0}")]
    DbError(#[from] db::DbError),
    /// Photo fetch error
    #[error("Fetch error: {0}")]
    FetchError(#[from] fetch::FetchError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Interactive prompt error
    #[error("Prompt error: {0}")]
    PromptError(#[from] dialoguer::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
