//! Core data types for statute citations.
//!
//! Offsets in matches are byte offsets into the searched text and always lie
//! on character boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-defined identifier of a law, usually its abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LawId(String);

impl LawId {
    /// Create a law id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LawId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for LawId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Canonical units of a German statute citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Paragraf (§, §§).
    #[serde(rename = "§")]
    Paragraf,
    /// Artikel (Art.).
    #[serde(rename = "Art")]
    Artikel,
    /// Nummer (Nr.).
    #[serde(rename = "Nr")]
    Nummer,
    /// Absatz (Abs.).
    #[serde(rename = "Abs")]
    Absatz,
    /// Unterabsatz (Unterabs.).
    #[serde(rename = "Uabs")]
    Unterabsatz,
    /// Satz (S.).
    #[serde(rename = "Satz")]
    Satz,
    /// Ziffer (Ziff.).
    #[serde(rename = "Ziffer")]
    Ziffer,
    /// Buchstabe (Buchst.).
    #[serde(rename = "Buchstabe")]
    Buchstabe,
    /// Halbsatz.
    #[serde(rename = "Halbsatz")]
    Halbsatz,
    /// Teilsatz.
    #[serde(rename = "Teilsatz")]
    Teilsatz,
    /// Abschnitt (Abschn.).
    #[serde(rename = "Abschnitt")]
    Abschnitt,
    /// Alternative (Alt.).
    #[serde(rename = "Alternative")]
    Alternative,
    /// Anhang.
    #[serde(rename = "Anhang")]
    Anhang,
}

impl Unit {
    /// Get the canonical tag of the unit.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraf => "§",
            Self::Artikel => "Art",
            Self::Nummer => "Nr",
            Self::Absatz => "Abs",
            Self::Unterabsatz => "Uabs",
            Self::Satz => "Satz",
            Self::Ziffer => "Ziffer",
            Self::Buchstabe => "Buchstabe",
            Self::Halbsatz => "Halbsatz",
            Self::Teilsatz => "Teilsatz",
            Self::Abschnitt => "Abschnitt",
            Self::Alternative => "Alternative",
            Self::Anhang => "Anhang",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (unit, value) step of a reference path, e.g. `Abs 4`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathComponent {
    /// Canonical unit.
    pub unit: Unit,
    /// Numeral, letter, roman numeral or ordinal word.
    pub value: String,
}

impl PathComponent {
    /// Create a new path component.
    #[must_use]
    pub fn new(unit: Unit, value: impl Into<String>) -> Self {
        Self {
            unit,
            value: value.into(),
        }
    }
}

impl fmt::Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.unit, self.value)
    }
}

/// A fully qualified citation point like `§ 123 Abs 4 Satz 5`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferencePath(Vec<PathComponent>);

impl ReferencePath {
    /// Create a path from its components.
    #[must_use]
    pub fn new(components: Vec<PathComponent>) -> Self {
        Self(components)
    }

    /// Build a path from (unit, value) pairs.
    ///
    /// # Examples
    /// ```
    /// use normzitat::types::{ReferencePath, Unit};
    ///
    /// let path = ReferencePath::from_pairs(&[(Unit::Paragraf, "123"), (Unit::Absatz, "4")]);
    /// assert_eq!(path.to_string(), "§ 123 Abs 4");
    /// ```
    #[must_use]
    pub fn from_pairs(pairs: &[(Unit, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(unit, value)| PathComponent::new(*unit, *value))
                .collect(),
        )
    }

    /// Get the components in order.
    #[must_use]
    pub fn components(&self) -> &[PathComponent] {
        &self.0
    }

    /// Units of all components in order.
    pub fn units(&self) -> impl Iterator<Item = Unit> + '_ {
        self.0.iter().map(|c| c.unit)
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ReferencePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

/// How the law name following a main area was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Law name found in the lookup table.
    Dict,
    /// A book of the Sozialgesetzbuch.
    Sgb,
    /// European legislation.
    Eu,
    /// A law name recognized but deliberately left unresolved.
    Ignore,
    /// A connecting article ("des", "der") without a recognized law name.
    Unknown,
    /// No law name; the citation refers to the law being read.
    Internal,
}

impl MatchKind {
    /// Get the lowercase tag of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dict => "dict",
            Self::Sgb => "sgb",
            Self::Eu => "eu",
            Self::Ignore => "ignore",
            Self::Unknown => "unknown",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suffix and law-name lengths following a main area, with their kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LawArea {
    /// Length in bytes of the connective between main area and law name.
    pub suffix_len: usize,
    /// Length in bytes of the law name.
    pub law_len: usize,
    /// Classification of the law name.
    pub kind: MatchKind,
}

impl LawArea {
    /// Law area of a citation without law name.
    #[must_use]
    pub fn internal() -> Self {
        Self {
            suffix_len: 0,
            law_len: 0,
            kind: MatchKind::Internal,
        }
    }
}

/// A citation whose trigger is followed by a main area.
///
/// The main area, suffix and law name are contiguous and in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainAreaMatch<'t> {
    text: &'t str,
    start: usize,
    end: usize,
    area: LawArea,
}

impl<'t> MainAreaMatch<'t> {
    /// Create a match covering `start..end` followed by `area`.
    #[must_use]
    pub fn new(text: &'t str, start: usize, end: usize, area: LawArea) -> Self {
        debug_assert!(end + area.suffix_len + area.law_len <= text.len());
        Self {
            text,
            start,
            end,
            area,
        }
    }

    /// Start of the trigger.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// End of the main area.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Length of the suffix.
    #[must_use]
    pub fn suffix_len(&self) -> usize {
        self.area.suffix_len
    }

    /// Length of the law name.
    #[must_use]
    pub fn law_len(&self) -> usize {
        self.area.law_len
    }

    /// Classification of the law name.
    #[must_use]
    pub fn kind(&self) -> MatchKind {
        self.area.kind
    }

    /// Trigger and main area, e.g. "§ 123 Abs. 4, Nr 5 und 6".
    #[must_use]
    pub fn main_text(&self) -> &'t str {
        &self.text[self.start..self.end]
    }

    /// Text joining the main area with the law name, e.g. " des ".
    ///
    /// Empty if no law is named.
    #[must_use]
    pub fn suffix_text(&self) -> &'t str {
        &self.text[self.end..self.end + self.area.suffix_len]
    }

    /// The referenced law as written in the text.
    #[must_use]
    pub fn law_text(&self) -> &'t str {
        let law_start = self.end + self.area.suffix_len;
        &self.text[law_start..law_start + self.area.law_len]
    }

    /// End of the law name, i.e. of everything this match consumed.
    #[must_use]
    pub fn consumed_end(&self) -> usize {
        self.end + self.area.suffix_len + self.area.law_len
    }
}

impl fmt::Display for MainAreaMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Main:{};Suffix:{};Law:{};Type:{}",
            self.main_text(),
            self.suffix_text(),
            self.law_text(),
            self.kind()
        )
    }
}

/// A match of the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatuteMatch<'t> {
    /// A trigger (e.g. "§") not followed by a citation.
    Bare {
        text: &'t str,
        start: usize,
        end: usize,
    },
    /// A trigger followed by a main area.
    WithMainArea(MainAreaMatch<'t>),
}

impl<'t> StatuteMatch<'t> {
    /// Whether the match has a main area that can be parsed.
    #[must_use]
    pub fn has_main_area(&self) -> bool {
        matches!(self, Self::WithMainArea(_))
    }

    /// The main-area match, if any.
    #[must_use]
    pub fn as_main_area(&self) -> Option<&MainAreaMatch<'t>> {
        match self {
            Self::Bare { .. } => None,
            Self::WithMainArea(m) => Some(m),
        }
    }

    /// Start of the trigger.
    #[must_use]
    pub fn start(&self) -> usize {
        match self {
            Self::Bare { start, .. } => *start,
            Self::WithMainArea(m) => m.start(),
        }
    }

    /// End of the trigger or main area.
    #[must_use]
    pub fn end(&self) -> usize {
        match self {
            Self::Bare { end, .. } => *end,
            Self::WithMainArea(m) => m.end(),
        }
    }

    /// Position after everything the match consumed, where searching resumes.
    #[must_use]
    pub fn consumed_end(&self) -> usize {
        match self {
            Self::Bare { end, .. } => *end,
            Self::WithMainArea(m) => m.consumed_end(),
        }
    }
}

impl fmt::Display for StatuteMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bare { text, start, end } => write!(f, "Text:{};", &text[*start..*end]),
            Self::WithMainArea(m) => write!(f, "{m}"),
        }
    }
}

/// A fully decoded citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
    /// Start of the trigger.
    pub start: usize,
    /// End of the law name (or main area if no law is named).
    pub end: usize,
    /// Trigger and main area.
    pub main: String,
    /// Connective between main area and law name.
    pub suffix: String,
    /// Law name as written.
    pub law: String,
    /// Classification of the law name.
    pub kind: MatchKind,
    /// Decoded reference paths.
    pub paths: Vec<ReferencePath>,
    /// Resolved law, `None` for eu, ignore and unknown.
    pub law_id: Option<LawId>,
}
