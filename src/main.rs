//! Albumtag CLI application entry point
//!
//! Browses a photo album by the people tagged in it and drives the tagging
//! workflow.
//!
//! # Usage
//!
//! ```bash
//! # List photos (default command)
//! albumtag
//! albumtag gallery "an" -a tran_an.png -p 2
//!
//! # Known avatars, most photographed first
//! albumtag avatars --by-count
//!
//! # Tag photos one at a time
//! albumtag tag --start 0042.jpg
//!
//! # Download the photos of one person and leave feedback
//! albumtag download -a le_ha.png -o ./le_ha -m "thanks!"
//!
//! # Maintenance
//! albumtag stats
//! albumtag check
//! albumtag transliterate --rename-files --dry-run
//! albumtag cache clear
//! ```
//!
//! # Configuration
//!
//! On first run, albumtag prompts for initial setup. Configuration is stored
//! in the user's config directory (`~/.config/albumtag/config.toml` on Linux)
//! and can be overridden with `ALBUMTAG_*` environment variables. Logging goes
//! to stderr and follows `RUST_LOG`, falling back to the configured
//! `log_level`.

use albumtag::{
    Album, AlbumError,
    cli::{Cli, Commands, FeedbackCommands},
    commands,
    config::AlbumConfig,
};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, AlbumError>;

fn init_logging(config: &AlbumConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let config = AlbumConfig::load_or_setup(cli.config.as_deref())?;
    init_logging(&config);

    let quiet = cli.quiet || config.quiet;
    let command = cli.get_command();

    if let Commands::Config { command } = &command {
        return commands::config::execute(command, &config, cli.config.as_deref());
    }

    let album = Album::open(config)?;

    match &command {
        Commands::Gallery {
            filter,
            page,
            per_page,
            all,
        } => commands::gallery(&album, filter, *page, *per_page, *all, quiet)?,
        Commands::Avatars { filter, by_count } => {
            commands::avatars(&album, filter.as_deref(), *by_count, quiet)?;
        }
        Commands::Tag { start, probe } => commands::tag(&album, start.as_deref(), *probe, quiet)?,
        Commands::Stats { check } => commands::stats(&album, *check, quiet)?,
        Commands::Check => commands::check(&album, quiet)?,
        Commands::Transliterate {
            rename_files,
            dry_run,
        } => commands::transliterate(&album, *rename_files, *dry_run, quiet)?,
        Commands::Feedback { command } => match command {
            FeedbackCommands::Add { message, photos } => {
                commands::feedback::add(&album, message, *photos, quiet)?;
            }
            FeedbackCommands::List => commands::feedback::list(&album, quiet)?,
        },
        Commands::Download {
            filter,
            photos,
            output,
            message,
            yes,
        } => commands::download(
            &album,
            filter,
            photos,
            output,
            message.as_deref(),
            *yes,
            quiet,
        )?,
        Commands::Save { input, feedback } => commands::save(&album, input.as_deref(), *feedback)?,
        Commands::Export { output } => commands::export(&album, output, quiet)?,
        Commands::Cache { command } => commands::cache(&album, command, quiet)?,
        Commands::Config { .. } => {}
    }

    Ok(())
}
