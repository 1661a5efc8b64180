//! Citation engine combining extraction, parsing and law resolution.

use std::sync::Arc;

use crate::error::Result;
use crate::extractor::StatutesExtractor;
use crate::lookup::LawLookupTable;
use crate::parser::{parse_main, LawResolver};
use crate::types::{Citation, LawId, MainAreaMatch, StatuteMatch};

/// Extracts and decodes all citations of a text.
///
/// The engine holds its lookup table behind an `Arc`; it is `Send + Sync` and
/// can be shared by worker threads.
///
/// # Examples
/// ```
/// use normzitat::engine::CitationEngine;
/// use normzitat::lookup::LawLookupTable;
/// use normzitat::types::LawId;
///
/// let engine = CitationEngine::new(LawLookupTable::build([("Grundgesetz", "GG")]));
/// let current = LawId::from("GVG");
/// let citations: Vec<_> = engine
///     .citations("nach Art. 1 des Grundgesetzes und § 5", Some(&current))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(citations[0].law_id, Some(LawId::from("GG")));
/// assert_eq!(citations[1].law_id, Some(current));
/// ```
#[derive(Debug, Clone)]
pub struct CitationEngine {
    extractor: StatutesExtractor,
    resolver: LawResolver,
}

impl CitationEngine {
    /// Create an engine owning `lookup`.
    #[must_use]
    pub fn new(lookup: LawLookupTable) -> Self {
        Self::from_shared(Arc::new(lookup))
    }

    /// Create an engine sharing `lookup` with other engines.
    #[must_use]
    pub fn from_shared(lookup: Arc<LawLookupTable>) -> Self {
        Self {
            extractor: StatutesExtractor::new(Arc::clone(&lookup)),
            resolver: LawResolver::new(lookup),
        }
    }

    /// The extractor used by this engine.
    #[must_use]
    pub fn extractor(&self) -> &StatutesExtractor {
        &self.extractor
    }

    /// The law resolver used by this engine.
    #[must_use]
    pub fn resolver(&self) -> &LawResolver {
        &self.resolver
    }

    /// Iterate over all decodable citations of `text`.
    ///
    /// Triggers without main area are skipped. Each item fails independently,
    /// so callers can skip unparsable citations and continue. An item also
    /// fails when its law name looks like a Sozialgesetzbuch book that does
    /// not exist ("SGB 13"), with [`CitationError::LawNameNotResolved`].
    ///
    /// [`CitationError::LawNameNotResolved`]: crate::error::CitationError::LawNameNotResolved
    pub fn citations<'a>(
        &'a self,
        text: &'a str,
        current_law: Option<&'a LawId>,
    ) -> impl Iterator<Item = Result<Citation>> + 'a {
        self.extractor
            .find_all(text, 0)
            .filter_map(|found| match found {
                StatuteMatch::WithMainArea(m) => Some(m),
                StatuteMatch::Bare { start, end, .. } => {
                    tracing::debug!(start, end, "Trigger without citation");
                    None
                }
            })
            .map(move |m| self.decode(&m, current_law))
    }

    /// Parse and resolve a single main-area match.
    pub fn decode(&self, m: &MainAreaMatch<'_>, current_law: Option<&LawId>) -> Result<Citation> {
        let paths = parse_main(m.main_text())?;
        let law_id = self
            .resolver
            .resolve_law(m.law_text(), m.kind(), current_law)?;
        Ok(Citation {
            start: m.start(),
            end: m.consumed_end(),
            main: m.main_text().to_string(),
            suffix: m.suffix_text().to_string(),
            law: m.law_text().to_string(),
            kind: m.kind(),
            paths,
            law_id,
        })
    }
}
