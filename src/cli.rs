//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for albumtag using the `clap` crate.
//!
//! # Commands
//!
//! - **gallery**: List photos, filtered by search term and/or avatars (default)
//! - **avatars**: List known avatars with their photo counts
//! - **tag**: Interactive sequential tagging session
//! - **stats**: Regenerate or check the avatar statistics file
//! - **check**: Cross-check manifest, tags and statistics
//! - **transliterate**: Convert avatar names to plain ASCII
//! - **feedback**: Add to or list the feedback log
//! - **download**: Download filtered photos into a directory
//! - **save**: Apply a save request (`{"type": ..., "data": ...}`) from a file or stdin
//! - **export**: Write the tag table to a file
//! - **cache**: Clear the local cache so the data files are read again
//! - **config**: Show the configuration or its location
//!
//! Global `--quiet` limits output to results only; `--config` points at an
//! alternative config file.

use crate::search::SelectionQuery;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Photo filter arguments shared by `gallery` and `download`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Search term, matched against avatar names, then photo names
    #[arg(value_name = "SEARCH")]
    pub search: Option<String>,

    /// Only photos tagged with any of these avatars
    #[arg(short = 'a', long = "avatar", value_name = "AVATAR", num_args = 1..)]
    pub avatars: Vec<String>,
}

impl FilterArgs {
    /// The filter query these arguments describe
    #[must_use]
    pub fn query(&self) -> SelectionQuery {
        SelectionQuery {
            search_term: self.search.clone().unwrap_or_default(),
            selected_avatars: self.avatars.clone(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "albumtag")]
#[command(about = "Browse and tag a photo album by the people in it", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Use this config file instead of the default location
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List photos, optionally filtered (default command)
    #[command(visible_alias = "g")]
    Gallery {
        #[command(flatten)]
        filter: FilterArgs,

        /// Page to show (1-based)
        #[arg(short = 'p', long = "page", default_value_t = 1)]
        page: usize,

        /// Photos per page (overrides config)
        #[arg(long = "per-page", value_name = "N")]
        per_page: Option<usize>,

        /// Show every matching photo on one page
        #[arg(long = "all", conflicts_with = "page")]
        all: bool,
    },

    /// List known avatars with their photo counts
    #[command(visible_alias = "a")]
    Avatars {
        /// Only avatars whose name contains this text
        #[arg(value_name = "FILTER")]
        filter: Option<String>,

        /// Order by photo count instead of manifest order
        #[arg(short = 'c', long = "by-count")]
        by_count: bool,
    },

    /// Tag photos one at a time
    #[command(visible_alias = "t")]
    Tag {
        /// Photo to start at
        #[arg(short = 's', long = "start", value_name = "PHOTO")]
        start: Option<String>,

        /// Skip photos the photo source cannot provide
        #[arg(long = "probe")]
        probe: bool,
    },

    /// Regenerate the avatar statistics file
    Stats {
        /// Only report whether the file is out of date
        #[arg(long = "check")]
        check: bool,
    },

    /// Cross-check the avatar manifest, tag table and statistics
    Check,

    /// Convert avatar names in the data files to plain ASCII
    Transliterate {
        /// Also rename the avatar image files in the configured avatars directory
        #[arg(long = "rename-files")]
        rename_files: bool,

        /// Show what would change without writing anything
        #[arg(short = 'n', long = "dry-run")]
        dry_run: bool,
    },

    /// Manage the feedback log
    #[command(visible_alias = "fb")]
    Feedback {
        #[command(subcommand)]
        command: FeedbackCommands,
    },

    /// Download photos into a directory
    #[command(visible_alias = "dl")]
    Download {
        #[command(flatten)]
        filter: FilterArgs,

        /// Download these photos instead of a filter result
        #[arg(long = "photo", value_name = "PHOTO", num_args = 1.., conflicts_with_all = ["search", "avatars"])]
        photos: Vec<String>,

        /// Destination directory
        #[arg(short = 'o', long = "output", value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Leave a feedback message with the download
        #[arg(short = 'm', long = "message", value_name = "TEXT")]
        message: Option<String>,

        /// Don't ask for confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Apply a save request read from a file or stdin
    Save {
        /// JSON request file; reads stdin when omitted
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Treat the input as a single feedback record to append
        #[arg(long = "feedback")]
        feedback: bool,
    },

    /// Write the tag table to a file as JSON
    Export {
        /// Output file
        #[arg(value_name = "FILE")]
        output: PathBuf,
    },

    /// Manage the local cache in front of the data files
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum FeedbackCommands {
    /// Append a message to the feedback log
    Add {
        /// Feedback text
        #[arg(value_name = "MESSAGE")]
        message: String,

        /// Number of photos the feedback refers to
        #[arg(short = 'n', long = "photos", default_value_t = 0)]
        photos: u64,
    },
    /// List the feedback log
    #[command(visible_alias = "ls")]
    List,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheCommands {
    /// Drop cached tags and feedback; the next run reads the data files
    Clear,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The command to run, defaulting to an unfiltered gallery
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Gallery {
            filter: FilterArgs::default(),
            page: 1,
            per_page: None,
            all: false,
        })
    }
}
