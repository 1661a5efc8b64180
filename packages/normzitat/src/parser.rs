//! Parsing of main areas into reference paths and resolution of law names.
//!
//! A main area like "§ 123 Abs. 4 Satz 5 und 6" is decoded in five steps:
//!
//! 1. normalize whitespace and a few common inconsistencies
//! 2. split enumerations and ranges into separate parts
//! 3. tokenize each part and pair units with their values
//! 4. split paths that were written together without connective ("§ 1 § 2")
//! 5. infer omitted units from the preceding path

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{CitationError, Result};
use crate::lookup::LawLookupTable;
use crate::patterns::citation::{
    is_numeral, is_ordinal, is_unit, merge_continuations, normalize_citation, sgb_book,
    split_enum_parts, split_range_parts, strip_decoration, tokenize, unit_of, SgbBook,
};
use crate::stemming::stem_law_name;
use crate::types::{LawId, MatchKind, PathComponent, ReferencePath, Unit};

/// A part of a citation that was skipped without failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
pub enum Notice {
    /// The part ends with a unit that has no value.
    UnitAtEnd { unit: String, part: String },
    /// An ordinal word is not followed by a unit.
    OrdinalWithoutUnit { ordinal: String, part: String },
    /// Splitting left a part without any unit or value.
    EmptyPart { part: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnitAtEnd { unit, part } => {
                write!(f, "Citation '{part}' ends with unit '{unit}', ignoring the unit")
            }
            Self::OrdinalWithoutUnit { ordinal, part } => {
                write!(f, "'{ordinal}' is not followed by a unit in '{part}'")
            }
            Self::EmptyPart { part } => write!(f, "Empty citation part '{part}'"),
        }
    }
}

/// Reference paths of a main area together with everything that was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedCitation {
    /// Decoded reference paths in citation order.
    pub paths: Vec<ReferencePath>,
    /// Skipped parts, in the order they were encountered.
    pub notices: Vec<Notice>,
}

/// A path component whose unit may still have to be inferred.
#[derive(Debug, Clone)]
struct Pending {
    unit: Option<Unit>,
    value: String,
}

/// Parse the main area of a citation into reference paths.
///
/// # Examples
/// ```
/// use normzitat::parser::parse_main;
/// use normzitat::types::{ReferencePath, Unit};
///
/// let paths = parse_main("§ 123 Abs. 4 Satz 5 und 6").unwrap();
/// assert_eq!(
///     paths,
///     vec![
///         ReferencePath::from_pairs(&[
///             (Unit::Paragraf, "123"),
///             (Unit::Absatz, "4"),
///             (Unit::Satz, "5"),
///         ]),
///         ReferencePath::from_pairs(&[
///             (Unit::Paragraf, "123"),
///             (Unit::Absatz, "4"),
///             (Unit::Satz, "6"),
///         ]),
///     ]
/// );
/// ```
pub fn parse_main(main_text: &str) -> Result<Vec<ReferencePath>> {
    parse_main_detailed(main_text).map(|parsed| parsed.paths)
}

/// Like [`parse_main`], but also report the parts that were skipped.
pub fn parse_main_detailed(main_text: &str) -> Result<ParsedCitation> {
    let citation = normalize_citation(main_text.trim());
    let mut notices = Vec::new();

    let mut paths = Vec::new();
    for enum_part in split_enum_parts(&citation) {
        for part in split_range_parts(enum_part) {
            let pairs = pair_tokens(part, &mut notices)?;
            if pairs.is_empty() {
                notices.push(Notice::EmptyPart {
                    part: part.to_string(),
                });
            } else {
                paths.push(pairs);
            }
        }
    }

    for notice in &notices {
        tracing::warn!(citation = %citation, "{notice}");
    }

    let paths = infer_units(split_accidentally_joined(paths), &citation)?;
    Ok(ParsedCitation { paths, notices })
}

/// Bring a unit token into its canonical form, e.g. "Sätze" to [`Unit::Satz`].
///
/// # Examples
/// ```
/// use normzitat::parser::stem_unit;
/// use normzitat::types::Unit;
///
/// assert_eq!(stem_unit("Artikel").unwrap(), Unit::Artikel);
/// assert!(stem_unit("Clause").is_err());
/// ```
pub fn stem_unit(token: &str) -> Result<Unit> {
    unit_of(token).ok_or_else(|| CitationError::NoUnitMatched(token.to_string()))
}

/// Tokenize one citation part and pair units with values.
fn pair_tokens(part: &str, notices: &mut Vec<Notice>) -> Result<Vec<Pending>> {
    let merged = merge_continuations(part);
    let mut tokens = tokenize(&merged).into_iter();
    let mut pairs = Vec::new();

    while let Some(token) = tokens.next() {
        let (unit, value) = if is_unit(token) {
            let Some(value) = tokens.next() else {
                notices.push(Notice::UnitAtEnd {
                    unit: token.to_string(),
                    part: part.to_string(),
                });
                break;
            };
            let unit = stem_unit(token)?;
            if !is_numeral(value) {
                return Err(malformed(value, part));
            }
            (Some(unit), value)
        } else if is_ordinal(token) {
            // "dritter Halbsatz": the value comes before its unit
            let Some(unit) = tokens.next().and_then(unit_of) else {
                notices.push(Notice::OrdinalWithoutUnit {
                    ordinal: token.to_string(),
                    part: part.to_string(),
                });
                continue;
            };
            (Some(unit), token)
        } else if is_numeral(token) {
            (None, token)
        } else {
            return Err(malformed(token, part));
        };

        pairs.push(Pending {
            unit,
            value: strip_decoration(value).into_owned(),
        });
    }
    Ok(pairs)
}

fn malformed(token: &str, citation: &str) -> CitationError {
    CitationError::MalformedToken {
        token: token.to_string(),
        citation: citation.to_string(),
    }
}

/// Start a new path wherever the top-level unit recurs inside a path.
///
/// The top-level unit is "Art" if it appears anywhere in the citation, "§"
/// otherwise.
fn split_accidentally_joined(paths: Vec<Vec<Pending>>) -> Vec<Vec<Pending>> {
    let main_unit = if paths
        .iter()
        .flatten()
        .any(|p| p.unit == Some(Unit::Artikel))
    {
        Unit::Artikel
    } else {
        Unit::Paragraf
    };

    let mut split = Vec::with_capacity(paths.len());
    for path in paths {
        let mut current: Vec<Pending> = Vec::new();
        for component in path {
            if component.unit == Some(main_unit) && !current.is_empty() {
                split.push(std::mem::take(&mut current));
            }
            current.push(component);
        }
        split.push(current);
    }
    split
}

/// Fill in omitted units and prepend the levels a path shares with its
/// predecessor.
///
/// In "§ 123 Abs. 1 S. 2, 3 S. 4" the "3" is followed by "S." whose parent
/// in the preceding path is "Abs.", so the second path becomes
/// "§ 123 Abs 3 Satz 4".
fn infer_units(paths: Vec<Vec<Pending>>, citation: &str) -> Result<Vec<ReferencePath>> {
    let mut resolved: Vec<Vec<PathComponent>> = Vec::with_capacity(paths.len());

    for mut path in paths {
        let mut prefix = Vec::new();
        let first_unit = path.first().map(|p| p.unit);
        if let (Some(prev), Some(first_unit)) = (resolved.last(), first_unit) {
            let prev_units: Vec<Unit> = prev.iter().map(|c| c.unit).collect();
            if let Some(&last_unit) = prev_units.last() {
                let leading = first_unit.unwrap_or_else(|| {
                    path.get(1)
                        .and_then(|second| second.unit)
                        .and_then(|unit| prev_units.iter().position(|&u| u == unit))
                        .filter(|&idx| idx > 0)
                        .map_or(last_unit, |idx| prev_units[idx - 1])
                });
                path[0].unit = Some(leading);

                prefix = match prev_units.iter().position(|&u| u == leading) {
                    Some(idx) => prev[..idx].to_vec(),
                    None => prev.clone(),
                };
            }
        }

        let mut components = prefix;
        for pending in path {
            let Some(unit) = pending.unit else {
                return Err(CitationError::UnitNotInferred {
                    value: pending.value,
                    citation: citation.to_string(),
                });
            };
            components.push(PathComponent::new(unit, pending.value));
        }
        resolved.push(components);
    }

    Ok(resolved.into_iter().map(ReferencePath::new).collect())
}

/// Resolves the law name of a match to a law id.
#[derive(Debug, Clone)]
pub struct LawResolver {
    lookup: Arc<LawLookupTable>,
}

impl LawResolver {
    /// Create a resolver sharing the given lookup table.
    #[must_use]
    pub fn new(lookup: Arc<LawLookupTable>) -> Self {
        Self { lookup }
    }

    /// Resolve `law_text` according to the kind assigned by the extractor.
    ///
    /// Returns `Ok(None)` for kinds that are intentionally left unresolved
    /// (eu, ignore, unknown). An internal reference resolves to
    /// `current_law` and fails if none is given.
    ///
    /// Books IX and X of the Sozialgesetzbuch have two common ids. The
    /// roman id is chosen only if it is registered in the lookup table and
    /// the arabic one is not; otherwise the arabic id is returned, even
    /// when it is not registered.
    pub fn resolve_law(
        &self,
        law_text: &str,
        kind: MatchKind,
        current_law: Option<&LawId>,
    ) -> Result<Option<LawId>> {
        let not_resolved = || CitationError::LawNameNotResolved {
            law_text: law_text.to_string(),
            kind,
        };

        match kind {
            MatchKind::Dict => {
                let stemmed = stem_law_name(law_text);
                self.lookup
                    .match_law_name(&stemmed)
                    .and_then(|name| self.lookup.get(name))
                    .cloned()
                    .map(Some)
                    .ok_or_else(not_resolved)
            }
            MatchKind::Sgb => match sgb_book(&stem_law_name(law_text)) {
                Some(SgbBook::Single(law_id)) => Ok(Some(law_id.clone())),
                Some(SgbBook::Pair(roman, arabic)) => {
                    let law_id = if self.lookup.contains_value(roman)
                        && !self.lookup.contains_value(arabic)
                    {
                        roman
                    } else {
                        arabic
                    };
                    Ok(Some(law_id.clone()))
                }
                None => Err(not_resolved()),
            },
            MatchKind::Internal => current_law
                .cloned()
                .map(Some)
                .ok_or(CitationError::InternalContextMissing),
            MatchKind::Eu | MatchKind::Ignore | MatchKind::Unknown => Ok(None),
        }
    }
}
