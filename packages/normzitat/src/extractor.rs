//! Reference-area extraction.
//!
//! Finds citation triggers in a text, delimits the main area that follows and
//! classifies the law name after it. The extractor never fails: every branch
//! falls back to [`MatchKind::Unknown`] or [`MatchKind::Internal`].

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::config::{char_window, LAW_NAME_WINDOW_CHARS};
use crate::lookup::LawLookupTable;
use crate::patterns::{area, law_name};
use crate::stemming::stem_law_name;
use crate::types::{LawArea, MainAreaMatch, MatchKind, StatuteMatch};

/// Word and non-word runs, used to map a stemmed match back onto raw text.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WORD_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w']+|[\W']+").expect("valid regex"));

/// Finds references to statutes in German legal text.
#[derive(Debug, Clone)]
pub struct StatutesExtractor {
    lookup: Arc<LawLookupTable>,
}

impl StatutesExtractor {
    /// Create an extractor sharing the given lookup table.
    #[must_use]
    pub fn new(lookup: Arc<LawLookupTable>) -> Self {
        Self { lookup }
    }

    /// The lookup table used for dictionary matches.
    #[must_use]
    pub fn lookup(&self) -> &Arc<LawLookupTable> {
        &self.lookup
    }

    /// Find the next citation at or after byte position `pos`.
    ///
    /// A `pos` inside a multi-byte character is moved forward to the next
    /// character boundary.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use normzitat::extractor::StatutesExtractor;
    /// use normzitat::lookup::LawLookupTable;
    ///
    /// let lookup = LawLookupTable::build([("Bürgerliches Gesetzbuch", "BGB")]);
    /// let extractor = StatutesExtractor::new(Arc::new(lookup));
    /// let m = extractor
    ///     .search("Lorem ipsum § 123 Abs. 3 des Bürgerlichen Gesetzbuches", 0)
    ///     .unwrap();
    /// assert_eq!(
    ///     m.to_string(),
    ///     "Main:§ 123 Abs. 3;Suffix: des ;Law:Bürgerlichen Gesetzbuches;Type:dict"
    /// );
    /// ```
    #[must_use]
    pub fn search<'t>(&self, text: &'t str, pos: usize) -> Option<StatuteMatch<'t>> {
        let pos = next_char_boundary(text, pos)?;
        let trigger = area::find_trigger(text, pos)?;

        let Some(end) = area::main_area(text, trigger.end) else {
            return Some(StatuteMatch::Bare {
                text,
                start: trigger.start,
                end: trigger.end,
            });
        };

        let law_area = self.suffix_and_law_name(&text[end..]);
        Some(StatuteMatch::WithMainArea(MainAreaMatch::new(
            text,
            trigger.start,
            end,
            law_area,
        )))
    }

    /// Iterate over all citations from byte position `pos` on.
    pub fn find_all<'e, 't>(&'e self, text: &'t str, pos: usize) -> Matches<'e, 't> {
        Matches {
            extractor: self,
            text,
            pos: Some(pos),
        }
    }

    /// Classify the text following a main area.
    ///
    /// Returns the length of the connective, the length of the law name and
    /// the kind of the law name. Lengths are in bytes.
    #[must_use]
    pub fn suffix_and_law_name(&self, rest: &str) -> LawArea {
        let suffix_len = law_name::suffix_article_len(rest);
        if suffix_len > 0 {
            let window = char_window(&rest[suffix_len..], LAW_NAME_WINDOW_CHARS);
            let (law_len, kind) = nonzero(self.dict_law_name_len(window), MatchKind::Dict)
                .or_else(|| nonzero(law_name::sgb_law_name_len(window), MatchKind::Sgb))
                .or_else(|| nonzero(law_name::eu_law_name_len(window), MatchKind::Eu))
                .or_else(|| {
                    nonzero(
                        law_name::suffix_ignore_law_name_len(window),
                        MatchKind::Ignore,
                    )
                })
                .unwrap_or((0, MatchKind::Unknown));
            return LawArea {
                suffix_len,
                law_len,
                kind,
            };
        }

        // without "des"/"der" the law name must follow after whitespace
        let head = char_window(rest, LAW_NAME_WINDOW_CHARS);
        let window = head.trim_start();
        let suffix_len = head.len() - window.len();
        if suffix_len == 0 {
            return LawArea::internal();
        }

        nonzero(self.dict_law_name_len(window), MatchKind::Dict)
            .or_else(|| nonzero(law_name::sgb_law_name_len(window), MatchKind::Sgb))
            .or_else(|| {
                nonzero(
                    law_name::no_suffix_ignore_law_name_len(window),
                    MatchKind::Ignore,
                )
            })
            .map_or(LawArea::internal(), |(law_len, kind)| LawArea {
                suffix_len,
                law_len,
                kind,
            })
    }

    /// Length in bytes of the dictionary law name at the start of `window`.
    ///
    /// The match is found on the stemmed window and transposed onto the raw
    /// window token by token. It is rejected if the last raw token does not
    /// stem to the last matched token, e.g. "Grundgesetzkommentar" does not
    /// contain the law name "Grundgesetz".
    #[must_use]
    pub fn dict_law_name_len(&self, window: &str) -> usize {
        let stemmed = stem_law_name(window);
        let Some(matched) = self.lookup.match_law_name(&stemmed) else {
            return 0;
        };

        let raw_tokens: Vec<&str> = WORD_RUNS.find_iter(window).map(|m| m.as_str()).collect();
        let match_tokens: Vec<&str> = WORD_RUNS.find_iter(matched).map(|m| m.as_str()).collect();
        let Some(last_idx) = match_tokens.len().checked_sub(1) else {
            return 0;
        };
        let Some(last_raw) = raw_tokens.get(last_idx) else {
            return 0;
        };

        if stem_law_name(last_raw) != match_tokens[last_idx] {
            return 0;
        }
        raw_tokens[..=last_idx].iter().map(|t| t.len()).sum()
    }
}

/// Iterator over the citations of a text, see [`StatutesExtractor::find_all`].
#[derive(Debug)]
pub struct Matches<'e, 't> {
    extractor: &'e StatutesExtractor,
    text: &'t str,
    pos: Option<usize>,
}

impl<'t> Iterator for Matches<'_, 't> {
    type Item = StatuteMatch<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let found = self.extractor.search(self.text, self.pos?);
        self.pos = found.as_ref().map(StatuteMatch::consumed_end);
        found
    }
}

fn nonzero(len: usize, kind: MatchKind) -> Option<(usize, MatchKind)> {
    (len > 0).then_some((len, kind))
}

fn next_char_boundary(text: &str, pos: usize) -> Option<usize> {
    if pos > text.len() {
        return None;
    }
    (pos..=text.len()).find(|&idx| text.is_char_boundary(idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> StatutesExtractor {
        let lookup = LawLookupTable::build([
            ("buergerlich gesetzbuch", "BGB"),
            ("grundgesetz", "GG"),
            ("gg", "GG"),
        ]);
        StatutesExtractor::new(Arc::new(lookup))
    }

    fn search_str(text: &str) -> String {
        extractor()
            .search(text, 0)
            .map_or_else(|| "None".to_string(), |m| m.to_string())
    }

    #[test]
    fn test_extract_dict_with_suffix() {
        assert_eq!(
            search_str("Lorem ipsum § 123 Abs. 3 des Bürgerliches Gesetzbuches"),
            "Main:§ 123 Abs. 3;Suffix: des ;Law:Bürgerliches Gesetzbuches;Type:dict"
        );
    }

    #[test]
    fn test_extract_dict_without_suffix() {
        assert_eq!(
            search_str("Art. 20a Abs. 1 Grundgesetz"),
            "Main:Art. 20a Abs. 1;Suffix: ;Law:Grundgesetz;Type:dict"
        );
    }

    #[test]
    fn test_extract_enumeration_with_oder() {
        let ex = extractor();
        assert_eq!(ex.lookup().len(), 3);

        let text = "nach § 3, 4 oder 5 sowie 7 Grundgesetz";
        let found = ex.search(text, 0).unwrap();
        let m = found.as_main_area().unwrap();
        assert_eq!(
            m.to_string(),
            "Main:§ 3, 4 oder 5 sowie 7;Suffix: ;Law:Grundgesetz;Type:dict"
        );
        assert_eq!(m.suffix_len(), 1);
        assert_eq!(m.law_len(), "Grundgesetz".len());
        assert_eq!(m.consumed_end(), text.len());
    }

    #[test]
    fn test_extract_internal() {
        assert_eq!(
            search_str("Art. 20a Abs. 1"),
            "Main:Art. 20a Abs. 1;Suffix:;Law:;Type:internal"
        );
        assert_eq!(
            search_str("nach § 5 Abs. 2 regelt das Nähere"),
            "Main:§ 5 Abs. 2;Suffix:;Law:;Type:internal"
        );
    }

    #[test]
    fn test_extract_rejects_longer_word() {
        assert_eq!(
            search_str("Art. 20a Abs. 1 Grundgesetzkommentar"),
            "Main:Art. 20a Abs. 1;Suffix:;Law:;Type:internal"
        );
    }

    #[test]
    fn test_extract_sgb() {
        assert_eq!(
            search_str("§ 123 Drittes Buch Sozialgesetzbuch"),
            "Main:§ 123;Suffix: ;Law:Drittes Buch Sozialgesetzbuch;Type:sgb"
        );
        assert_eq!(
            search_str("§ 123 des Dritten Buches Sozialgesetzbuch mehr"),
            "Main:§ 123;Suffix: des ;Law:Dritten Buches Sozialgesetzbuch;Type:sgb"
        );
    }

    #[test]
    fn test_extract_eu() {
        assert_eq!(
            search_str("Art. 123 der Richtlinie 12/34/EU"),
            "Main:Art. 123;Suffix: der ;Law:Richtlinie 12/34/EU;Type:eu"
        );
    }

    #[test]
    fn test_extract_ignore() {
        assert_eq!(
            search_str("§ 5 des Gesetzes vom 3. April 2020 (BGBl. I S. 999) gilt"),
            "Main:§ 5;Suffix: des ;Law:Gesetzes vom 3. April 2020 (BGBl. I S. 999);Type:ignore"
        );
        assert_eq!(
            search_str("§ 5 dieser Verordnung"),
            "Main:§ 5;Suffix: ;Law:dieser Verordnung;Type:ignore"
        );
    }

    #[test]
    fn test_extract_unknown() {
        assert_eq!(
            search_str("§ 5 der asdasdasd"),
            "Main:§ 5;Suffix: der ;Law:;Type:unknown"
        );
    }

    #[test]
    fn test_extract_abbreviation() {
        let text = "nicht ohne Weiteres der Fall. Art. 2 Abs. 1 i.V.m. Art. 1 Abs. 1 GG bietet";
        assert_eq!(
            search_str(text),
            "Main:Art. 2 Abs. 1 i.V.m. Art. 1 Abs. 1;Suffix: ;Law:GG;Type:dict"
        );
    }

    #[test]
    fn test_no_match_and_bare_trigger() {
        assert_eq!(search_str("Lorem ipsum dolor"), "None");
        let m = extractor().search("Lorem § ipsum", 0).unwrap();
        assert!(!m.has_main_area());
        assert_eq!(m.to_string(), "Text:§ ;");
    }

    #[test]
    fn test_find_all() {
        let text = "Art. 123a der asdasdasd df f sdf  § df dfdf  § 123 Grundgesetz";
        let ex = extractor();
        let found: Vec<String> = ex.find_all(text, 0).map(|m| m.to_string()).collect();
        assert_eq!(
            found,
            vec![
                "Main:Art. 123a;Suffix: der ;Law:;Type:unknown".to_string(),
                "Text:§ ;".to_string(),
                "Main:§ 123;Suffix: ;Law:Grundgesetz;Type:dict".to_string(),
            ]
        );
    }

    #[test]
    fn test_find_all_is_monotonic_and_restartable() {
        let text = "§ 1 BGB, § 2 des Grundgesetzes und Art. 3 sowie § ";
        let ex = extractor();
        let ends: Vec<usize> = ex.find_all(text, 0).map(|m| m.consumed_end()).collect();
        assert!(ends.windows(2).all(|w| w[0] < w[1]));

        let second_start = ex.find_all(text, 0).nth(1).unwrap().start();
        let restarted: Vec<usize> = ex
            .find_all(text, second_start)
            .map(|m| m.consumed_end())
            .collect();
        assert_eq!(restarted, ends[1..].to_vec());
    }

    #[test]
    fn test_spans_are_within_text() {
        let text = "§ 3 Nr. 1 Buchst. a und b des Grundgesetzes";
        for m in extractor().find_all(text, 0) {
            let m = m.as_main_area().unwrap();
            assert!(m.start() <= m.end());
            assert!(m.consumed_end() <= text.len());
        }
    }

    #[test]
    fn test_search_from_inside_multibyte_char() {
        let text = "§ 1 und § 2";
        // position 1 is inside the first "§"
        let m = extractor().search(text, 1).unwrap();
        assert_eq!(m.start(), "§ 1 und ".len());
        assert!(extractor().search(text, text.len() + 1).is_none());
    }

    #[test]
    fn test_law_name_window_is_bounded() {
        let padding = "x".repeat(LAW_NAME_WINDOW_CHARS + 10);
        let text = format!("§ 1 {padding}");
        let m = extractor().search(&text, 0).unwrap();
        assert_eq!(m.as_main_area().unwrap().kind(), MatchKind::Internal);
    }
}
