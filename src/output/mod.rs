//! Output formatting for CLI display
//!
//! Helpers for rendering photos, avatars, sizes and status lines.

use crate::avatar::display_name;
use crate::index::AvatarRef;
use byte_unit::{Byte, UnitType};
use colored::Colorize;

/// Human readable byte size (`12 MiB`)
#[must_use]
pub fn format_size(bytes: u64) -> String {
    Byte::from_u64(bytes)
        .get_appropriate_unit(UnitType::Binary)
        .to_string()
}

/// Format a photo with the avatars tagged in it
#[must_use]
pub fn photo_with_avatars(photo: &str, avatars: &[AvatarRef], quiet: bool) -> String {
    if quiet {
        return photo.to_string();
    }
    if avatars.is_empty() {
        return format!("  {photo} {}", "(untagged)".dimmed());
    }

    let names: Vec<&str> = avatars
        .iter()
        .map(|avatar| display_name(&avatar.normalized))
        .collect();
    format!("  {photo} [{}]", names.join(", ").cyan())
}

/// Format an avatar with the number of photos it appears in
#[must_use]
pub fn avatar_with_count(avatar: &str, count: usize, quiet: bool) -> String {
    if quiet {
        return avatar.to_string();
    }
    let count = if count == 0 {
        "no photos".dimmed().to_string()
    } else {
        format!("{count} photo(s)")
    };
    format!("  {} ({count})", display_name(avatar).bold())
}

/// A section heading
#[must_use]
pub fn heading(text: &str) -> String {
    text.bold().underline().to_string()
}

/// A passed check
#[must_use]
pub fn ok(text: &str) -> String {
    format!("{} {text}", "✓".green())
}

/// A failed check
#[must_use]
pub fn problem(text: &str) -> String {
    format!("{} {text}", "✗".red())
}

/// An indented list item
#[must_use]
pub fn item(text: &str) -> String {
    format!("    - {text}")
}
