//! ASCII transliteration of avatar filenames
//!
//! Vietnamese names carry stacked diacritics that can be stored either
//! precomposed or as combining sequences depending on the tool that wrote
//! them. Folding everything to ASCII once, at ingestion, removes the
//! ambiguity for every later comparison.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Remove diacritics from a string
///
/// Decomposes (NFD), drops combining marks and maps the stroked `đ`/`Đ`,
/// which have no decomposition, to `d`/`D`.
///
/// # Examples
/// ```
/// use albumtag::avatar::transliterate;
///
/// assert_eq!(transliterate("Nguyễn Văn Đức"), "Nguyen Van Duc");
/// ```
#[must_use]
pub fn transliterate(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' => 'd',
            'Đ' => 'D',
            other => other,
        })
        .collect()
}

/// Transliterate the file stem of a filename, keeping its extension
#[must_use]
pub fn transliterate_filename(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}.{ext}", transliterate(stem)),
        _ => transliterate(filename),
    }
}
