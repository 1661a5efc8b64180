//! Grammar of the main area of a citation.
//!
//! ```text
//! trigger   := "§" | "§§" | "Art" "."? | "Artikel" ("s" | "n")*
//! main      := numeral step*
//! step      := ws* ( conn unit ws numeral
//!                  | conn numeral
//!                  | unit ws numeral
//!                  | conn? ordinal ws+ unit )
//! numeral   := (decimal | roman | letter ")"?) ("ff." | "f." | "ff")?
//! conn      := ","? ("," | "und" | "sowie" | "bis" | "oder" | "jeweils"? "auch"? "i.V.m.")
//!              "nach"? article?
//! ```
//!
//! Every rule is implemented as a function that takes a byte position and
//! returns the end of its match. Each vocabulary item is a small regex anchored
//! at the start of the remaining text; the rules compose them with ordered
//! choice and greedy repetition.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Trigger of a citation.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TRIGGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)§{1,2}|\bArt\b\.?|Artikels?n?").expect("valid regex"));

/// Numeral with optional "ff." continuation.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:\d+(?:\.\d+)*[a-z]?|[ivx]+|[a-z]\)?)(?:\s?ff?\.|\s?ff\b|\b)")
        .expect("valid regex")
});

/// Ordinal word as used in "dritter Halbsatz".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:erste|zweite|dritte|letzte)r?s?").expect("valid regex")
});

/// Unit of a citation. The `art` group needs a word boundary before it.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:",
        r"(?P<art>Art\b\.?)|",
        r"Artikels?n?|",
        r"§{1,2}|",
        r"Nrn?\b\.?|",
        r"Nummer|",
        r"Abs\b\.?|",
        r"Absatz|",
        r"Absätze|",
        r"Unterabsatz|",
        r"Unterabs\b\.?|",
        r"S\b\.?|",
        r"Satz|",
        r"Sätze|",
        r"Ziffern?|",
        r"Ziffn?\b\.?|",
        r"Buchstaben?|",
        r"Buchst\b\.?|",
        r"Halbsatz|",
        r"Teilsatz|",
        r"Abschnitte?|",
        r"Abschn\b\.?|",
        r"Alternativen?|",
        r"Alt\b\.?|",
        r"Anhang|",
        r"Anhänge",
        r")"
    ))
    .expect("valid regex")
});

/// Connective between two numerals, including leading whitespace.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CONNECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^\s*,?(?:",
        r",\s*|",
        r"\s+und\s+|",
        r"\s+sowie\s+|",
        r"\s+bis\s+|",
        r"\s+oder\s+|",
        r"(?:\s+jeweils)?(?:\s+auch)?\s+(?:in\s+Verbindung\s+mit|i\.?\s?V\.?\s?m\.?)\s+",
        r")",
        r"(?:nach\s+)?",
        r"(?:(?:der|des|den|die)\s+)?"
    ))
    .expect("valid regex")
});

/// A trigger located in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    /// Start of the trigger symbol.
    pub start: usize,
    /// End of the trigger including trailing whitespace.
    pub end: usize,
}

/// Find the next trigger at or after `pos`.
#[must_use]
pub fn find_trigger(text: &str, pos: usize) -> Option<Trigger> {
    let m = TRIGGER.find_at(text, pos)?;
    Some(Trigger {
        start: m.start(),
        end: skip_whitespace(text, m.end()),
    })
}

/// Match a main area starting at `pos`, returning its end.
#[must_use]
pub fn main_area(text: &str, pos: usize) -> Option<usize> {
    let mut end = numeral(text, pos)?;
    while let Some(next) = step(text, end) {
        if next <= end {
            break;
        }
        end = next;
    }
    Some(end)
}

/// One repetition after the leading numeral.
fn step(text: &str, pos: usize) -> Option<usize> {
    if let Some(after_conn) = connective(text, pos) {
        let with_unit = unit(text, after_conn)
            .and_then(|u| single_whitespace(text, u))
            .and_then(|u| numeral(text, u));
        if with_unit.is_some() {
            return with_unit;
        }
        if let Some(end) = numeral(text, after_conn) {
            return Some(end);
        }
    }

    let after_ws = skip_whitespace(text, pos);
    let unit_numeral = unit(text, after_ws)
        .and_then(|u| single_whitespace(text, u))
        .and_then(|u| numeral(text, u));
    if unit_numeral.is_some() {
        return unit_numeral;
    }

    connective(text, pos)
        .and_then(|c| ordinal_unit(text, c))
        .or_else(|| ordinal_unit(text, after_ws))
}

/// Ordinal word, whitespace and unit, e.g. "dritter Halbsatz".
fn ordinal_unit(text: &str, pos: usize) -> Option<usize> {
    let after_ordinal = anchored(&ORDINAL, text, pos)?;
    let after_ws = skip_whitespace(text, after_ordinal);
    if after_ws == after_ordinal {
        return None;
    }
    unit(text, after_ws)
}

/// Match a numeral at `pos`.
#[must_use]
pub fn numeral(text: &str, pos: usize) -> Option<usize> {
    anchored(&NUMERAL, text, pos)
}

/// Match a unit at `pos`.
#[must_use]
pub fn unit(text: &str, pos: usize) -> Option<usize> {
    let caps: Captures<'_> = UNIT.captures(text.get(pos..)?)?;
    if caps.name("art").is_some() && preceded_by_word_char(text, pos) {
        return None;
    }
    caps.get(0).map(|m| pos + m.end())
}

/// Match a connective at `pos`, including whitespace before it.
#[must_use]
pub fn connective(text: &str, pos: usize) -> Option<usize> {
    anchored(&CONNECTIVE, text, pos)
}

fn anchored(pattern: &Regex, text: &str, pos: usize) -> Option<usize> {
    pattern.find(text.get(pos..)?).map(|m| pos + m.end())
}

fn single_whitespace(text: &str, pos: usize) -> Option<usize> {
    let c = text.get(pos..)?.chars().next()?;
    c.is_whitespace().then(|| pos + c.len_utf8())
}

/// Skip a run of whitespace starting at `pos`.
#[must_use]
pub fn skip_whitespace(text: &str, pos: usize) -> usize {
    text.get(pos..).map_or(pos, |rest| {
        pos + rest.len() - rest.trim_start().len()
    })
}

fn preceded_by_word_char(text: &str, pos: usize) -> bool {
    text[..pos]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn main_of(text: &str) -> Option<&str> {
        let trigger = find_trigger(text, 0)?;
        main_area(text, trigger.end).map(|end| &text[trigger.start..end])
    }

    #[test]
    fn test_simple_main_areas() {
        assert_eq!(main_of("§ 123 Abs. 3 des BGB"), Some("§ 123 Abs. 3"));
        assert_eq!(main_of("Art. 20a Abs. 1"), Some("Art. 20a Abs. 1"));
        assert_eq!(main_of("§§ 1 bis 10 und 12"), Some("§§ 1 bis 10 und 12"));
    }

    #[test]
    fn test_in_verbindung_mit() {
        let text = "nicht ohne Weiteres der Fall. Art. 2 Abs. 1 i.V.m. Art. 1 Abs. 1 GG bietet nicht scho";
        assert_eq!(main_of(text), Some("Art. 2 Abs. 1 i.V.m. Art. 1 Abs. 1"));
        assert_eq!(
            main_of("§ 5 Abs. 2 in Verbindung mit § 6"),
            Some("§ 5 Abs. 2 in Verbindung mit § 6")
        );
    }

    #[test]
    fn test_oder_and_sowie() {
        assert_eq!(
            main_of("§ 3, 4 oder 5 sowie 7 Grundgesetz"),
            Some("§ 3, 4 oder 5 sowie 7")
        );
        assert_eq!(connective("4 oder 5", 1), Some(7));
    }

    #[test]
    fn test_jeweils_and_auch_before_in_verbindung_mit() {
        assert_eq!(
            main_of("§ 10 jeweils in Verbindung mit § 11 des Grundgesetzes"),
            Some("§ 10 jeweils in Verbindung mit § 11")
        );
        assert_eq!(
            main_of("§ 1 Abs. 2 auch i.V.m. Abs. 3 gilt"),
            Some("§ 1 Abs. 2 auch i.V.m. Abs. 3")
        );
        assert_eq!(
            main_of("Art. 3 jeweils auch i. V. m. Art. 4"),
            Some("Art. 3 jeweils auch i. V. m. Art. 4")
        );
    }

    #[test]
    fn test_ordinal_with_unit() {
        assert_eq!(main_of("§ 234 dritter Halbsatz gilt"), Some("§ 234 dritter Halbsatz"));
        assert_eq!(
            main_of("§ 12 Abs. 1 und erster Halbsatz"),
            Some("§ 12 Abs. 1 und erster Halbsatz")
        );
        // "Buch" is not a unit
        assert_eq!(main_of("§ 123 Drittes Buch Sozialgesetzbuch"), Some("§ 123"));
    }

    #[test]
    fn test_continuation_and_letters() {
        assert_eq!(main_of("§§ 12 ff. des Gesetzes"), Some("§§ 12 ff."));
        assert_eq!(main_of("§ 3 Nr. 1 Buchst. a und b"), Some("§ 3 Nr. 1 Buchst. a und b"));
    }

    #[test]
    fn test_trigger_without_numeral() {
        let text = "Lorem § ipsum";
        let trigger = find_trigger(text, 0).unwrap();
        assert_eq!(&text[trigger.start..trigger.end], "§ ");
        assert_eq!(main_area(text, trigger.end), None);
    }

    #[test]
    fn test_art_needs_word_boundary() {
        let text = "Die Startseite nennt Art. 5";
        let trigger = find_trigger(text, 0).unwrap();
        assert_eq!(&text[trigger.start..], "Art. 5");
        // inside a step, "Art" glued to a preceding word is not a unit
        assert_eq!(unit("xArt. 5", 1), None);
        assert_eq!(unit("x Art. 5", 2), Some(6));
    }

    #[test]
    fn test_artikel_trigger() {
        let text = "nach Artikel 3 Absatz 2";
        assert_eq!(main_of(text), Some("Artikel 3 Absatz 2"));
    }

    #[test]
    fn test_connective_backtracks_into_leading_whitespace() {
        assert_eq!(connective("5 und 6", 1), Some(6));
        assert_eq!(connective(", 6", 0), Some(2));
        assert_eq!(connective(" des 6", 0), None);
    }

    #[test]
    fn test_skip_whitespace_handles_unicode() {
        let text = "§\u{a0}\u{a0}5";
        assert_eq!(skip_whitespace(text, 2), 6);
    }
}
