//! Patterns for the law name that may follow a main area.
//!
//! All patterns are anchored at the start of the candidate window and return
//! the byte length of the recognized law name, or 0.

use regex::Regex;
use std::sync::LazyLock;

/// Article connecting main area and law name: " des ", ", der ".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUFFIX_ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^,?\s+?de[sr]\s+").expect("valid regex"));

/// Book of the Sozialgesetzbuch.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SGB_LAW_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:",
        r"(?:",
        r"(?:erst|zweit|dritt|viert|fünft|sechst|siebt|acht|neunt|zehnt|elft|zwölft)e[ns]?",
        r"|\d{1,2}\.",
        r") buche?s?(?:(?: des)? sozialgesetzbuche?s?)?",
        r"|",
        r"SGB[\s\-](?:(?:I|II|III|IV|V|VI|VII|VIII|IX|X|XI|XII)\b|\d{1,2})",
        r")"
    ))
    .expect("valid regex")
});

/// European legislation.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static EU_LAW_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:",
        r"(?:Delegierten )?(?:Durchführungs)?(?:Verordnung|Richtlinie)\s?",
        r"\((?:EU|EW?G|Euratom)\)\s+(?:Nr\.\s+)?\d+/\d+",
        r"|",
        r"(?:Durchführungs)?(?:Richtlinie|Entscheidung)\s+\d+/\d+/(?:EW?G|EU)\b",
        r"|",
        r"(?:Rahmen)?beschlusses\s\d+/\d+/\w\w\b",
        r")"
    ))
    .expect("valid regex")
});

/// Law names after " des "/" der " that are recognized but not resolved.
///
/// Needs look-around, hence the backtracking engine.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUFFIX_IGNORE: LazyLock<fancy_regex::Regex> = LazyLock::new(|| {
    fancy_regex::Regex::new(concat!(
        r"(?i)^(?:",
        // Gesetzes vom 3. April 2020 (BGBl. I S. 999)
        r"(?:Gesetzes|Anordnung) vom \d+. \w+ \d+ \(BGBl\. I S\. \d+\)",
        r"|(?:G|AnO) v\. \d+\.\s?\d+\.\s?\d+ I+ \d+",
        // Saarland gazette
        r"|(?:saarländischen )?Gesetzes Nr\. \d+ ?[\w\s\-]{0,120} vom \d+. \w+ \d+ ",
        r"\(Amtsblatt des Saarlande?s S\. \d+\)",
        r"|(?:(?:[\w\-]+|\d+\.) ){0,5}(?:Durchführungs)?verordnung zum [\w\-]+gesetz",
        r"(?:(?: in der Fassung der Bekanntmachung)? vom \d+. \w+ \d+ \(.{8,50}\))?",
        // any statute, ordinance, code, convention or treaty
        r"|(?:[\w\-]{1,60}\s|\d+\.\s|Nr\.\s){0,8}?[\w\-]{3,60}",
        r"(?<!\bver)(?:ordnung|gesetz|gesetze?s?buch|übereinkommen|statut|vertrag)",
        r"(?:er|en|es|s)?\b(?! zum)(?: (?:von )?[\d/]+)?",
        r"(?:(?: in der Fassung)?(?: der Bekanntmachung)? vom \d+. \w+ \d+ \(.{8,50}\))?",
        r"|[\w\-]*tarifvertr(?:a|ä)ge?s?",
        r"|(?:abgelösten )?TV\s\w+",
        r"|Anlage\b",
        r"|(?:\w+\s)?\w*(?:Gesetz|Übereinkommen|vereinbarung|verordnung|Abkommens|Vertrag|",
        r"Konvention|Protokoll|Anordnung|Satzung|bestimmung|Verfassung)e?s?n?\s\s?",
        r"(?:zur|über|vom|zum|zu dem|von|zwischen|des|der|betreffend)",
        r"|\w*-(?:vertrag|abkommen)e?s?",
        // "in Absatz 2 genannten Verordnung"
        r"|(?:in\s(?!Artikels?n?)[\w\s\.]{2,100}?\s)?(?:vor)?(?:genannten|bezeichneten)\s",
        r"\w*(?:Verordnung|Gesetz)e?s?n?",
        // same, but stop before the next trigger
        r"|in\s(?=(?:Art|§)[\w\s\.§]{2,100}?\s(?:vor)?(?:genannten|bezeichneten)\s",
        r"\w*(?:Verordnung|Gesetz)e?s?n?)",
        r")"
    ))
    .expect("valid regex")
});

/// Law names without connecting article that are recognized but not resolved.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NO_SUFFIX_IGNORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:",
        r"dieser Verordnung",
        r"|(?:G|AnO)\s?[i\d/\-]* v(?:om)?\.? \d+\.\s?\d+\.\s?\d+(?: I+)? [\d\-]+",
        r")"
    ))
    .expect("valid regex")
});

fn match_len(pattern: &Regex, window: &str) -> usize {
    pattern.find(window).map_or(0, |m| m.end())
}

/// Length of a leading " des "/" der " connective, or 0.
#[must_use]
pub fn suffix_article_len(rest: &str) -> usize {
    match_len(&SUFFIX_ARTICLE, rest)
}

/// Length of a Sozialgesetzbuch name at the start of `window`, or 0.
#[must_use]
pub fn sgb_law_name_len(window: &str) -> usize {
    match_len(&SGB_LAW_NAME, window)
}

/// Length of a European law name at the start of `window`, or 0.
#[must_use]
pub fn eu_law_name_len(window: &str) -> usize {
    match_len(&EU_LAW_NAME, window)
}

/// Length of an ignored law name after a connecting article, or 0.
#[must_use]
pub fn suffix_ignore_law_name_len(window: &str) -> usize {
    match SUFFIX_IGNORE.find(window) {
        Ok(found) => found.map_or(0, |m| m.end()),
        Err(e) => {
            tracing::warn!(error = %e, "Law name pattern failed, treating as no match");
            0
        }
    }
}

/// Length of an ignored law name without connecting article, or 0.
#[must_use]
pub fn no_suffix_ignore_law_name_len(window: &str) -> usize {
    match_len(&NO_SUFFIX_IGNORE, window)
}
