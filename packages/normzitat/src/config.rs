//! Configuration constants and validation functions.

use crate::error::{CitationError, Result};

/// Maximum number of characters scanned for a law name after a main area.
///
/// Keeps the per-match cost of law-name classification independent of the
/// document length.
pub const LAW_NAME_WINDOW_CHARS: usize = 1000;

/// Log filter used by the binary when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Number of books of the Sozialgesetzbuch.
pub const SGB_BOOK_COUNT: usize = 12;

/// File extensions accepted for law-name files.
pub const LAW_NAME_FILE_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Validate a law identifier supplied by the caller.
///
/// Law ids are opaque, but an empty id or one with surrounding whitespace is
/// almost certainly a mistake on the command line.
///
/// # Examples
/// ```
/// use normzitat::config::validate_law_id;
///
/// assert!(validate_law_id("GVG").is_ok());
/// assert!(validate_law_id("").is_err());
/// assert!(validate_law_id(" BGB").is_err());
/// ```
pub fn validate_law_id(law_id: &str) -> Result<()> {
    if law_id.is_empty() || law_id.trim() != law_id {
        return Err(CitationError::InvalidLawId(law_id.to_string()));
    }
    Ok(())
}

/// Return the prefix of `text` holding at most `max_chars` characters.
///
/// # Examples
/// ```
/// use normzitat::config::char_window;
///
/// assert_eq!(char_window("Gesetzbuch", 6), "Gesetz");
/// assert_eq!(char_window("Gesetz", 100), "Gesetz");
/// ```
#[must_use]
pub fn char_window(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_law_id_valid() {
        assert!(validate_law_id("BGB").is_ok());
        assert!(validate_law_id("SGB-IX").is_ok());
        assert!(validate_law_id("buergerlich_gesetzbuch").is_ok());
    }

    #[test]
    fn test_validate_law_id_invalid() {
        assert!(validate_law_id("").is_err());
        assert!(validate_law_id("  ").is_err());
        assert!(validate_law_id("BGB\n").is_err());
    }

    #[test]
    fn test_char_window_counts_characters_not_bytes() {
        assert_eq!(char_window("Bürgerliches", 3), "Bür");
        assert_eq!(char_window("§§", 1), "§");
        assert_eq!(char_window("", 10), "");
    }

    #[test]
    fn test_constants_are_reasonable() {
        assert!(LAW_NAME_WINDOW_CHARS >= 100, "Should fit long law names");
        assert!(LAW_NAME_WINDOW_CHARS <= 10_000, "Should bound lookahead");
        assert_eq!(SGB_BOOK_COUNT, 12);
    }
}
