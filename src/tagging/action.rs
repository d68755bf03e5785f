//! Actions of the tagging workflow.

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// One step of a tagging session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagAction {
    /// Move to the next photo - `n`
    Next,
    /// Move to the previous photo - `p`
    Previous,
    /// Add the avatar if absent, remove it if present - `t <avatar>`
    Toggle(String),
    /// Remove the avatar from the current photo - `r <avatar>`
    Remove(String),
    /// Empty the current photo's draft - `c`
    ClearAll,
    /// Add the suggested avatars to the draft - `a`
    ApplySuggestions,
    /// Drop the suggestions for the current photo - `x`
    ClearSuggestions,
    /// Write the tag table to storage - `s`
    Save,
    /// Save, then write the tag table to a file - `e <path>`
    Export(PathBuf),
    /// Leave the session - `q`
    Quit,
}

/// What applying an action did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// State may have changed but the current photo did not
    Continue,
    /// The current photo changed
    Moved,
    /// The tag table was written; holds the number of photos in it
    Saved(usize),
    /// The tag table was written and exported to the given file
    Exported(PathBuf),
    /// The session should end
    Quit,
}

/// Error parsing a typed tagging command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseActionError {
    #[error("unknown command '{0}' (type 'h' for help)")]
    Unknown(String),

    #[error("command '{0}' needs an argument")]
    MissingArgument(String),
}

impl TagAction {
    /// Short usage line for each command, for the in-session help.
    pub const HELP: &'static [(&'static str, &'static str)] = &[
        ("n", "next photo"),
        ("p", "previous photo"),
        ("t <avatar>", "toggle an avatar"),
        ("r <avatar>", "remove an avatar"),
        ("c", "clear all avatars from this photo"),
        ("a", "apply suggestions"),
        ("x", "clear suggestions"),
        ("s", "save"),
        ("e <path>", "save and export to a file"),
        ("q", "quit"),
    ];

    /// Whether the action writes to storage.
    #[must_use]
    pub const fn persists(&self) -> bool {
        matches!(self, Self::Save | Self::Export(_))
    }
}

impl FromStr for TagAction {
    type Err = ParseActionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let (command, argument) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };
        let needs_argument = || {
            if argument.is_empty() {
                Err(ParseActionError::MissingArgument(command.to_string()))
            } else {
                Ok(argument.to_string())
            }
        };

        match command {
            "n" | "next" => Ok(Self::Next),
            "p" | "prev" | "previous" => Ok(Self::Previous),
            "t" | "toggle" => needs_argument().map(Self::Toggle),
            "r" | "remove" => needs_argument().map(Self::Remove),
            "c" | "clear" => Ok(Self::ClearAll),
            "a" | "apply" => Ok(Self::ApplySuggestions),
            "x" => Ok(Self::ClearSuggestions),
            "s" | "save" => Ok(Self::Save),
            "e" | "export" => needs_argument().map(|path| Self::Export(PathBuf::from(path))),
            "q" | "quit" => Ok(Self::Quit),
            other => Err(ParseActionError::Unknown(other.to_string())),
        }
    }
}
