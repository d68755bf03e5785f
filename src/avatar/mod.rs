//! Avatar identifiers
//!
//! Avatars are referenced by path strings such as `/avatars/Nguyen Van An.png`.
//! The same avatar shows up typed in different ways across the manifest, the
//! tag table and user input (`Nguyen Van An.png`, `avatars/...`,
//! `/avatars//avatars/...`). [`Normalizer`] folds all of these into one
//! canonical identifier so equality comparisons are reliable.
//!
//! Filenames are transliterated to plain ASCII when they are ingested (see
//! [`transliterate`]), so runtime normalization only has to deal with the
//! directory prefix.

mod transliterate;

pub use transliterate::{transliterate, transliterate_filename};

/// Default canonical directory prefix for avatar identifiers
pub const DEFAULT_AVATAR_PREFIX: &str = "/avatars/";

/// Produces canonical avatar identifiers
///
/// # Examples
/// ```
/// use albumtag::avatar::Normalizer;
///
/// let normalizer = Normalizer::default();
/// assert_eq!(normalizer.normalize("x.png"), "/avatars/x.png");
/// assert_eq!(normalizer.normalize("/avatars//avatars/x.png"), "/avatars/x.png");
/// assert_eq!(normalizer.normalize(""), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    /// Directory name without slashes (`avatars`)
    dir: String,
    /// Canonical prefix with leading and trailing slash (`/avatars/`)
    prefix: String,
}

impl Normalizer {
    /// Create a normalizer for the given directory prefix
    ///
    /// Leading and trailing slashes in `prefix` are ignored, so `avatars`,
    /// `/avatars` and `/avatars/` all configure the same normalizer.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        let dir = prefix.trim().trim_matches('/').to_string();
        let prefix = if dir.is_empty() {
            "/".to_string()
        } else {
            format!("/{dir}/")
        };
        Self { dir, prefix }
    }

    /// The canonical prefix every normalized identifier starts with
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Canonicalize an avatar reference
    ///
    /// Strips surrounding whitespace, leading slashes and any number of
    /// repeated directory prefixes, then prepends exactly one canonical
    /// prefix. Empty input (or input that is nothing but prefix) yields an
    /// empty string. Idempotent.
    #[must_use]
    pub fn normalize(&self, path: &str) -> String {
        let name = self.strip(path);
        if name.is_empty() {
            String::new()
        } else {
            format!("{}{name}", self.prefix)
        }
    }

    /// The filename part of an avatar reference, without any prefix
    #[must_use]
    pub fn filename<'a>(&self, path: &'a str) -> &'a str {
        self.strip(path)
    }

    fn strip<'a>(&self, path: &'a str) -> &'a str {
        let mut rest = path.trim();
        loop {
            let trimmed = rest.trim_start_matches('/');
            if self.dir.is_empty() {
                return trimmed;
            }
            match trimmed.strip_prefix(self.dir.as_str()) {
                Some(after) if after.is_empty() || after.starts_with('/') => rest = after,
                _ => return trimmed,
            }
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_AVATAR_PREFIX)
    }
}

/// Human readable name for an avatar or photo path
///
/// The last path segment up to its first `.`; `"Unknown"` when empty.
#[must_use]
pub fn display_name(path: &str) -> &str {
    let filename = path.rsplit('/').next().unwrap_or_default();
    match filename.split('.').next() {
        Some(name) if !name.is_empty() => name,
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepends_missing_prefix() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("x.png"), "/avatars/x.png");
        assert_eq!(n.normalize("avatars/x.png"), "/avatars/x.png");
        assert_eq!(n.normalize("/x.png"), "/avatars/x.png");
    }

    #[test]
    fn test_keeps_canonical_path() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("/avatars/x.png"), "/avatars/x.png");
    }

    #[test]
    fn test_strips_duplicate_prefixes() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("/avatars//avatars/x.png"), "/avatars/x.png");
        assert_eq!(n.normalize("//avatars/avatars/x.png"), "/avatars/x.png");
    }

    #[test]
    fn test_empty_and_prefix_only_input() {
        let n = Normalizer::default();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("   "), "");
        assert_eq!(n.normalize("/avatars/"), "");
        assert_eq!(n.normalize("/avatars"), "");
        assert_eq!(n.normalize("///"), "");
    }

    #[test]
    fn test_idempotent() {
        let n = Normalizer::default();
        let inputs = [
            "",
            "x.png",
            "/avatars/x.png",
            "avatars",
            "/avatars",
            "//avatars/avatars/x.png",
            " spaced name.png ",
            "/avatars/sub/dir.png",
            "avatarsx.png",
        ];
        for input in inputs {
            let once = n.normalize(input);
            assert_eq!(n.normalize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_custom_prefix() {
        let n = Normalizer::new("faces");
        assert_eq!(n.prefix(), "/faces/");
        assert_eq!(n.normalize("a.png"), "/faces/a.png");
        assert_eq!(n.normalize("/faces/faces/a.png"), "/faces/a.png");
    }

    #[test]
    fn test_root_prefix() {
        let n = Normalizer::new("/");
        assert_eq!(n.normalize("a.png"), "/a.png");
        assert_eq!(n.normalize("//a.png"), "/a.png");
    }

    #[test]
    fn test_filename() {
        let n = Normalizer::default();
        assert_eq!(n.filename("/avatars/x.png"), "x.png");
        assert_eq!(n.filename("x.png"), "x.png");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("/avatars/Tran Thi Binh.png"), "Tran Thi Binh");
        assert_eq!(display_name("a.b.png"), "a");
        assert_eq!(display_name("/avatars/"), "Unknown");
        assert_eq!(display_name(".hidden"), "Unknown");
    }
}
