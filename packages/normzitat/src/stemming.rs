//! Stemming of law names into comparison keys.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Inflectional suffix at the end of a word, never the whole word.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static INFLECTION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\B(?:er|en|es|s|e)\b").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Stem a law name so that inflected forms compare equal.
///
/// Strips one trailing inflectional suffix per word, lower-cases, transliterates
/// umlauts and ß, and collapses whitespace. The steps are repeated until the
/// result is stable, so stemming an already stemmed name is a no-op.
///
/// # Examples
/// ```
/// use normzitat::stemming::stem_law_name;
///
/// assert_eq!(stem_law_name("Bürgerlichen Gesetzbuches"), "buergerlich gesetzbuch");
/// assert_eq!(stem_law_name("Drittes Buch"), "dritt buch");
/// ```
#[must_use]
pub fn stem_law_name(name: &str) -> String {
    let mut current = stem_once(name);
    loop {
        let next = stem_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn stem_once(name: &str) -> String {
    let composed: String = name.trim().nfc().collect();
    let stripped = INFLECTION_SUFFIX.replace_all(&composed, "");
    clean_name(&stripped)
}

/// Normalize whitespace, case and German special characters.
///
/// # Examples
/// ```
/// use normzitat::stemming::clean_name;
///
/// assert_eq!(clean_name("Straßen  Verkehrs\nOrdnung"), "strassen verkehrs ordnung");
/// ```
#[must_use]
pub fn clean_name(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(name, " ")
        .replace('ß', "ss")
        .to_lowercase()
        .replace('ä', "ae")
        .replace('ü', "ue")
        .replace('ö', "oe")
}
