//! Search-text normalization.
//!
//! Queries and character names are compared case- and accent-insensitively:
//! "Oikawa" matches "oikawa", "Colocación" matches "colocacion".

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase the input and strip combining diacritical marks.
///
/// NFD-decomposes the string so precomposed accented letters split into a
/// base letter plus combining marks, then drops the marks.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
