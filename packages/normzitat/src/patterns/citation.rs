//! Tokens and split patterns used when decoding a main area.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::SGB_BOOK_COUNT;
use crate::types::{LawId, Unit};

/// Unit abbreviations and their canonical unit, matched case-sensitively
/// against a whole token.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static UNIT_TABLE: LazyLock<Vec<(Regex, Unit)>> = LazyLock::new(|| {
    [
        (r"§{1,2}", Unit::Paragraf),
        (r"Art\b\.?|[Aa]rtikels?n?", Unit::Artikel),
        (r"Nr\b\.?|Nummer|Nrn?\b\.?", Unit::Nummer),
        (r"[Aa][Bb][Ss]\b\.?|Absatz|Absätze", Unit::Absatz),
        (r"Unter[Aa]bsatz|Unter[Aa]bs\b\.?", Unit::Unterabsatz),
        (r"S\b\.?|Satz|Sätze", Unit::Satz),
        (r"Ziffern?|Ziffn?\b\.?", Unit::Ziffer),
        (r"Buchstaben?|Buchst\b\.?", Unit::Buchstabe),
        (r"Halbsatz", Unit::Halbsatz),
        (r"Teilsatz", Unit::Teilsatz),
        (r"Abschnitte?|Abschn\b\.?", Unit::Abschnitt),
        (r"Alternativen?|Alt\b\.?", Unit::Alternative),
        (r"Anhang|Anhänge", Unit::Anhang),
    ]
    .into_iter()
    .map(|(pattern, unit)| {
        let full = Regex::new(&format!("^(?:{pattern})$")).expect("valid regex");
        (full, unit)
    })
    .collect()
});

/// A whole numeral token, optionally with "ff." or a closing parenthesis.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMERAL_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:",
        r"(?:\d+(?:\.\d+)*[a-z]?|[ivx]+|[a-z]\)?)(?:ff?\.|ff)",
        r"|\d+(?:\.\d+)*[a-z]?|[ivx]+|[a-z]",
        r"|(?:\d+(?:\.\d+)*[a-z]|[ivx]+|[a-z])\)",
        r")$"
    ))
    .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ORDINAL_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:erste|zweite|dritte|letzte)r?s?$").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:ff?\.|ff|\))$").expect("valid regex"));

/// Numeral followed by a detached "ff." or "f.".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DETACHED_CONTINUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?[a-z]?|\b[ivx]+|\b[a-z]\)?)(?:\sff?\.|\sff\b)")
        .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PARAGRAPH_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"§(\d)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COMMA_BEFORE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\sbis\s").expect("valid regex"));

/// Connectives separating enumerated citation parts. Ranges ("bis") stay
/// together.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ENUM_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\s*,?(?:",
        r",\s*|",
        r"\s+und\s+|",
        r"\s+sowie\s+|",
        r"\s+oder\s+|",
        r"(?:\s+jeweils)?(?:\s+auch)?\s+(?:in\s+Verbindung\s+mit|i\.?\s?V\.?\s?m\.?)\s+",
        r")",
        r"(?:nach\s+)?",
        r"(?:(?:der|des|den|die)\s+)?"
    ))
    .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static RANGE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,?\s+bis\s+").expect("valid regex"));

/// Canonical unit of a unit token like "Abs." or "Sätze".
#[must_use]
pub fn unit_of(token: &str) -> Option<Unit> {
    UNIT_TABLE
        .iter()
        .find(|(pattern, _)| pattern.is_match(token))
        .map(|(_, unit)| *unit)
}

/// Whether the token is a unit abbreviation.
#[must_use]
pub fn is_unit(token: &str) -> bool {
    unit_of(token).is_some()
}

/// Whether the token is a value, e.g. "12", "3a", "iv", "b)" or "7ff.".
#[must_use]
pub fn is_numeral(token: &str) -> bool {
    NUMERAL_TOKEN.is_match(token)
}

/// Whether the token is an ordinal word written before its unit, as in
/// "dritter Halbsatz".
#[must_use]
pub fn is_ordinal(token: &str) -> bool {
    ORDINAL_TOKEN.is_match(token)
}

/// Strip a trailing "ff.", "f.", "ff" or ")" from a value.
///
/// # Examples
/// ```
/// use normzitat::patterns::citation::strip_decoration;
///
/// assert_eq!(strip_decoration("12ff."), "12");
/// assert_eq!(strip_decoration("b)"), "b");
/// assert_eq!(strip_decoration("20a"), "20a");
/// ```
#[must_use]
pub fn strip_decoration(value: &str) -> Cow<'_, str> {
    DECORATION.replace(value, "")
}

/// Fix common inconsistencies: whitespace runs, "§1" and ", bis ".
#[must_use]
pub fn normalize_citation(citation: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(citation, " ");
    let spaced = PARAGRAPH_DIGIT.replace_all(&collapsed, "§ $1");
    COMMA_BEFORE_RANGE.replace_all(&spaced, " bis ").into_owned()
}

/// Split a citation into its enumerated parts.
pub fn split_enum_parts(citation: &str) -> impl Iterator<Item = &str> {
    ENUM_SEPARATOR.split(citation)
}

/// Split an enumerated part into the endpoints of a range.
pub fn split_range_parts(part: &str) -> impl Iterator<Item = &str> {
    RANGE_SEPARATOR.split(part)
}

/// Attach a detached continuation to its numeral: "12 ff." becomes "12ff.".
#[must_use]
pub fn merge_continuations(part: &str) -> Cow<'_, str> {
    DETACHED_CONTINUATION.replace_all(part, "${1}ff.")
}

/// Split a citation part into unit and value tokens.
///
/// Tokens are separated by whitespace. A unit glued to its value ("Art.5",
/// "§5") is split as well.
///
/// # Examples
/// ```
/// use normzitat::patterns::citation::tokenize;
///
/// assert_eq!(tokenize("Art.5 Abs. 2"), vec!["Art.", "5", "Abs.", "2"]);
/// assert_eq!(tokenize("§§12"), vec!["§§", "12"]);
/// ```
#[must_use]
pub fn tokenize(part: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for piece in part.split(char::is_whitespace).filter(|p| !p.is_empty()) {
        let mut start = 0;
        for (idx, c) in piece.char_indices().skip(1) {
            if is_glued_split(&piece[..idx], c) {
                tokens.push(&piece[start..idx]);
                start = idx;
            }
        }
        tokens.push(&piece[start..]);
    }
    tokens
}

fn is_glued_split(before: &str, next: char) -> bool {
    if before.ends_with('§') {
        return next.is_ascii_alphanumeric();
    }
    if !next.is_ascii_digit() {
        return false;
    }
    let lower = before.to_lowercase();
    ["art.", "artikel", "artikeln"]
        .iter()
        .any(|unit| lower.ends_with(unit))
}

/// Law id of a book of the Sozialgesetzbuch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SgbBook {
    /// The book has one established id.
    Single(LawId),
    /// The book is abbreviated with a roman or an arabic numeral; the roman
    /// form comes first.
    Pair(LawId, LawId),
}

const SGB_ORDINALS: [&str; SGB_BOOK_COUNT] = [
    "erst", "zweit", "dritt", "viert", "fuenft", "sechst", "siebt", "acht", "neunt", "zehnt",
    "elft", "zwoelft",
];

const SGB_ROMANS: [&str; SGB_BOOK_COUNT] = [
    "i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x", "xi", "xii",
];

/// Stemmed spellings of the books of the Sozialgesetzbuch.
static SGB_BOOKS: LazyLock<HashMap<String, SgbBook>> = LazyLock::new(|| {
    let mut books = HashMap::new();
    for (idx, (word, roman)) in SGB_ORDINALS.iter().zip(SGB_ROMANS).enumerate() {
        let nr = idx + 1;
        let book = if nr == 9 || nr == 10 {
            SgbBook::Pair(
                LawId::new(format!("SGB-{}", roman.to_uppercase())),
                LawId::new(format!("SGB-{nr}")),
            )
        } else {
            SgbBook::Single(LawId::new(format!("SGB-{nr}")))
        };
        for key in [
            format!("{word} buch"),
            format!("{word} buch sozialgesetzbuch"),
            format!("{word} buch d sozialgesetzbuch"),
            format!("sgb {roman}"),
            format!("sgb {nr}"),
            format!("{nr}. buch"),
            format!("{nr}. buch sozialgesetzbuch"),
            format!("{nr}. buch d sozialgesetzbuch"),
            format!("sgb-{roman}"),
            format!("sgb-{nr}"),
        ] {
            books.insert(key, book.clone());
        }
    }
    books
});

/// Look up a stemmed Sozialgesetzbuch name like "dritt buch sozialgesetzbuch".
#[must_use]
pub fn sgb_book(stemmed_name: &str) -> Option<&'static SgbBook> {
    SGB_BOOKS.get(stemmed_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_table() {
        assert_eq!(unit_of("§§"), Some(Unit::Paragraf));
        assert_eq!(unit_of("Art."), Some(Unit::Artikel));
        assert_eq!(unit_of("artikeln"), Some(Unit::Artikel));
        assert_eq!(unit_of("ABS."), Some(Unit::Absatz));
        assert_eq!(unit_of("Absätze"), Some(Unit::Absatz));
        assert_eq!(unit_of("UnterAbs."), Some(Unit::Unterabsatz));
        assert_eq!(unit_of("S."), Some(Unit::Satz));
        assert_eq!(unit_of("Nrn."), Some(Unit::Nummer));
        assert_eq!(unit_of("Buchst."), Some(Unit::Buchstabe));
        assert_eq!(unit_of("Anhänge"), Some(Unit::Anhang));
    }

    #[test]
    fn test_unit_table_is_case_sensitive() {
        assert_eq!(unit_of("satz"), None);
        assert_eq!(unit_of("ABSCHNITT"), None);
        assert_eq!(unit_of("Abschnitt"), Some(Unit::Abschnitt));
        assert_eq!(unit_of("Clause"), None);
    }

    #[test]
    fn test_numeral_tokens() {
        for token in ["123", "20a", "1.2.3", "iv", "b", "b)", "12a)", "12ff.", "3f.", "7ff"] {
            assert!(is_numeral(token), "{token} should be a numeral");
        }
        for token in ["12)", "Chapter", "ab", ""] {
            assert!(!is_numeral(token), "{token} should not be a numeral");
        }
    }

    #[test]
    fn test_ordinal_tokens() {
        assert!(is_ordinal("dritter"));
        assert!(is_ordinal("DRITTER"));
        assert!(is_ordinal("letztes"));
        assert!(!is_ordinal("vierter"));
    }

    #[test]
    fn test_normalize_citation() {
        assert_eq!(normalize_citation("§12  Abs.\n3"), "§ 12 Abs. 3");
        assert_eq!(normalize_citation("§§ 1, bis 5"), "§§ 1 bis 5");
    }

    #[test]
    fn test_split_enum_parts_keeps_ranges() {
        let parts: Vec<_> =
            split_enum_parts("§§ 1 bis 3, 5 und 7 in Verbindung mit § 9").collect();
        assert_eq!(parts, vec!["§§ 1 bis 3", "5", "7", "§ 9"]);
    }

    #[test]
    fn test_split_enum_parts_oder() {
        let parts: Vec<_> = split_enum_parts("§ 3, 4 oder 5 sowie 7").collect();
        assert_eq!(parts, vec!["§ 3", "4", "5", "7"]);
    }

    #[test]
    fn test_split_enum_parts_jeweils_auch() {
        let parts: Vec<_> = split_enum_parts("§ 1 Abs. 2 auch i.V.m. Abs. 3").collect();
        assert_eq!(parts, vec!["§ 1 Abs. 2", "Abs. 3"]);
        let parts: Vec<_> =
            split_enum_parts("§ 10 jeweils in Verbindung mit § 11").collect();
        assert_eq!(parts, vec!["§ 10", "§ 11"]);
    }

    #[test]
    fn test_split_enum_parts_drops_article() {
        let parts: Vec<_> = split_enum_parts("Art. 1 sowie nach der Nr. 3").collect();
        assert_eq!(parts, vec!["Art. 1", "Nr. 3"]);
    }

    #[test]
    fn test_split_range_parts() {
        let parts: Vec<_> = split_range_parts("§§ 1 bis 3").collect();
        assert_eq!(parts, vec!["§§ 1", "3"]);
    }

    #[test]
    fn test_merge_continuations() {
        assert_eq!(merge_continuations("§§ 12 ff."), "§§ 12ff.");
        assert_eq!(merge_continuations("§ 3 f. Satz 1"), "§ 3ff. Satz 1");
        assert_eq!(merge_continuations("§ 3 Satz 1"), "§ 3 Satz 1");
    }

    #[test]
    fn test_tokenize_glued_units() {
        assert_eq!(tokenize("Artikel7"), vec!["Artikel", "7"]);
        assert_eq!(tokenize("§a"), vec!["§", "a"]);
        assert_eq!(tokenize("Art5"), vec!["Art5"]);
        assert_eq!(tokenize("  § 1  "), vec!["§", "1"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_sgb_books() {
        assert_eq!(
            sgb_book("dritt buch sozialgesetzbuch"),
            Some(&SgbBook::Single(LawId::from("SGB-3")))
        );
        assert_eq!(
            sgb_book("sgb ix"),
            Some(&SgbBook::Pair(LawId::from("SGB-IX"), LawId::from("SGB-9")))
        );
        assert_eq!(
            sgb_book("10. buch sozialgesetzbuch"),
            Some(&SgbBook::Pair(LawId::from("SGB-X"), LawId::from("SGB-10")))
        );
        assert_eq!(
            sgb_book("zwoelft buch d sozialgesetzbuch"),
            Some(&SgbBook::Single(LawId::from("SGB-12")))
        );
        assert_eq!(sgb_book("sgb xiii"), None);
    }
}
