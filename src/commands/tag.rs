//! Tag command - interactive sequential tagging

use crate::avatar::{Normalizer, display_name};
use crate::fetch::probe_existing;
use crate::manifest::{AvatarManifest, AvatarMatch};
use crate::tagging::{ActionOutcome, TagAction, TaggingSession};
use crate::{AlbumError, Album, output};
use colored::Colorize;
use dialoguer::{Confirm, Input};
use tracing::warn;

type Result<T> = std::result::Result<T, AlbumError>;

/// Replace a typed avatar argument with the manifest path it names
///
/// Input that matches nothing is passed through as typed so new avatars can
/// still be tagged; ambiguous input is an error listing the candidates.
fn resolve_action(
    action: TagAction,
    manifest: &AvatarManifest,
    normalizer: &Normalizer,
) -> std::result::Result<TagAction, String> {
    let resolve = |input: String| match manifest.resolve(&input, normalizer) {
        AvatarMatch::Found(avatar) => Ok(avatar.to_string()),
        AvatarMatch::Unknown => Ok(input),
        AvatarMatch::Ambiguous(candidates) => Err(format!(
            "'{input}' matches several avatars: {}",
            candidates
                .iter()
                .map(|c| display_name(c))
                .collect::<Vec<_>>()
                .join(", ")
        )),
    };

    match action {
        TagAction::Toggle(input) => resolve(input).map(TagAction::Toggle),
        TagAction::Remove(input) => resolve(input).map(TagAction::Remove),
        other => Ok(other),
    }
}

fn print_help() {
    for (keys, description) in TagAction::HELP {
        println!("  {} {description}", format!("{keys:<14}").cyan());
    }
}

fn print_status(session: &TaggingSession) {
    let Some(photo) = session.current_photo() else {
        return;
    };
    println!();
    println!(
        "{} {} ({}/{}, {} tagged)",
        output::heading("Photo"),
        photo.bold(),
        session.position() + 1,
        session.photos().len(),
        session.processed_count()
    );

    let draft = session.current_draft();
    if draft.is_empty() {
        println!("  Avatars: {}", "none".dimmed());
    } else {
        let names: Vec<&str> = draft.iter().map(|a| display_name(a)).collect();
        println!("  Avatars: {}", names.join(", ").green());
    }
    if !session.suggestions().is_empty() {
        let names: Vec<&str> = session.suggestions().iter().map(|a| display_name(a)).collect();
        println!("  Suggested: {}", names.join(", ").yellow());
    }
    if session.has_unsaved_changes() {
        println!("  {}", "(unsaved changes)".yellow());
    } else if session.has_unpersisted_changes() {
        println!("  {}", "(earlier photos not saved)".yellow());
    }
}

/// Quitting asks first while any edit, on this photo or an earlier one,
/// has not reached storage
fn needs_quit_confirmation(session: &TaggingSession, action: &TagAction) -> bool {
    *action == TagAction::Quit && session.has_unpersisted_changes()
}

/// Execute the tag command
///
/// # Errors
/// Returns an error if the terminal prompt fails or photos cannot be probed
pub fn execute(album: &Album, start: Option<&str>, probe: bool, quiet: bool) -> Result<()> {
    let photos = if probe {
        let fetcher = album.fetcher()?;
        probe_existing(fetcher.as_ref(), album.photos(), album.config().download_delay())
    } else {
        album.photos().to_vec()
    };

    if photos.is_empty() {
        if !quiet {
            println!("No photos to tag.");
        }
        return Ok(());
    }

    let mut session = album.tagging_session(photos);
    if let Some(start) = start
        && !session.go_to(start)
    {
        return Err(AlbumError::InvalidInput(format!(
            "Photo '{start}' is not in the album"
        )));
    }

    if !quiet {
        print_help();
    }

    loop {
        print_status(&session);
        let line: String = Input::new()
            .with_prompt("action")
            .allow_empty(true)
            .interact_text()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "h" | "help" | "?") {
            print_help();
            continue;
        }

        let action = match line
            .parse::<TagAction>()
            .map_err(|e| e.to_string())
            .and_then(|a| resolve_action(a, album.manifest(), album.normalizer()))
        {
            Ok(action) => action,
            Err(message) => {
                println!("{}", output::problem(&message));
                continue;
            }
        };

        if needs_quit_confirmation(&session, &action)
            && !Confirm::new()
                .with_prompt("Discard unsaved changes and quit?")
                .default(false)
                .interact()?
        {
            continue;
        }

        match session.apply(action, album.store()) {
            Ok(ActionOutcome::Quit) => break,
            Ok(ActionOutcome::Saved(count)) => {
                println!("{}", output::ok(&format!("Saved tags for {count} photo(s)")));
            }
            Ok(ActionOutcome::Exported(path)) => {
                println!("{}", output::ok(&format!("Exported to {}", path.display())));
            }
            Ok(ActionOutcome::Continue | ActionOutcome::Moved) => {}
            Err(e) => {
                warn!(error = %e, "tagging write failed");
                println!("{}", output::problem(&format!("Save failed: {e}")));
            }
        }
    }
    Ok(())
}
