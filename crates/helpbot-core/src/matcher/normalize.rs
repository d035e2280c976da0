//! Text normalization for case- and accent-insensitive matching.

use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block (U+0300..=U+036F).
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Lowercase, decompose to NFD, drop combining marks. Whitespace is kept.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Lowercase, decompose to NFD, drop combining marks, trim.
///
/// `"  Café "` and `"cafe"` both normalize to `"cafe"`. The function is
/// idempotent: normalizing its own output changes nothing.
pub fn normalize(text: &str) -> String {
    fold(text).trim().to_string()
}

/// True when folding leaves `text` unchanged, i.e. it can occur inside a
/// normalized utterance.
pub fn is_folded(text: &str) -> bool {
    fold(text) == text
}
