//! Immutable lookup table of stemmed law names.
//!
//! The table is built once and never mutated. Callers that need a different
//! set of law names build a new table and swap the `Arc` they share.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::config::LAW_NAME_FILE_EXTENSIONS;
use crate::error::{CitationError, Result};
use crate::stemming::stem_law_name;
use crate::types::LawId;

/// Mapping of stemmed law names to law ids.
#[derive(Debug, Clone, Default)]
pub struct LawLookupTable {
    names: HashMap<String, LawId>,
    /// Keys ordered by descending character count, ties in ascending order.
    keys_by_length: Vec<String>,
    values: HashSet<LawId>,
}

impl LawLookupTable {
    /// Build a table from raw law names and their ids.
    ///
    /// Every name is stemmed with [`stem_law_name`]. If two names share a stem,
    /// the later entry wins.
    ///
    /// # Examples
    /// ```
    /// use normzitat::lookup::LawLookupTable;
    ///
    /// let table = LawLookupTable::build([("Bürgerliches Gesetzbuch", "BGB"), ("BGB", "BGB")]);
    /// assert_eq!(table.get("buergerlich gesetzbuch").map(|id| id.as_str()), Some("BGB"));
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn build<I, N, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, L)>,
        N: AsRef<str>,
        L: Into<LawId>,
    {
        let mut names: HashMap<String, LawId> = HashMap::new();
        for (raw_name, law_id) in entries {
            let stem = stem_law_name(raw_name.as_ref());
            if stem.is_empty() {
                continue;
            }
            let law_id = law_id.into();
            if let Some(previous) = names.insert(stem.clone(), law_id.clone()) {
                if previous != law_id {
                    tracing::warn!(
                        name = %stem,
                        previous = %previous,
                        replacement = %law_id,
                        "Law name maps to more than one law id, keeping the last"
                    );
                }
            }
        }

        let mut keys_by_length: Vec<String> = names.keys().cloned().collect();
        keys_by_length.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        let values = names.values().cloned().collect();

        tracing::debug!(names = names.len(), "Built law lookup table");
        Self {
            names,
            keys_by_length,
            values,
        }
    }

    /// Parse a JSON object of law names to law ids.
    pub fn from_json_str(json: &str, include_abbreviations: bool) -> Result<Self> {
        let file: LawNameFile = serde_json::from_str(json)?;
        Ok(file.into_table(include_abbreviations))
    }

    /// Parse a YAML mapping of law names to law ids.
    pub fn from_yaml_str(yaml: &str, include_abbreviations: bool) -> Result<Self> {
        let file: LawNameFile = serde_yaml_ng::from_str(yaml)?;
        Ok(file.into_table(include_abbreviations))
    }

    /// Load a law-name file, choosing the format by extension.
    ///
    /// With `include_abbreviations`, every law id is also registered as a name
    /// of its own so that citations like "§ 1 BGB" resolve.
    pub fn load(path: &Path, include_abbreviations: bool) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if !LAW_NAME_FILE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(CitationError::UnsupportedLawNameFormat(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        if extension == "json" {
            Self::from_json_str(&content, include_abbreviations)
        } else {
            Self::from_yaml_str(&content, include_abbreviations)
        }
    }

    /// Get the law id of a stemmed name.
    #[must_use]
    pub fn get(&self, stemmed_name: &str) -> Option<&LawId> {
        self.names.get(stemmed_name)
    }

    /// Find the longest stemmed name that is a prefix of `stemmed_text`.
    ///
    /// Among names of equal length the lexicographically smallest wins.
    ///
    /// # Examples
    /// ```
    /// use normzitat::lookup::LawLookupTable;
    ///
    /// let table = LawLookupTable::build([("Gesetz", "G"), ("Gesetzbuch", "GB")]);
    /// assert_eq!(table.match_law_name("gesetzbuch d bundes"), Some("gesetzbuch"));
    /// assert_eq!(table.match_law_name("verordnung"), None);
    /// ```
    #[must_use]
    pub fn match_law_name(&self, stemmed_text: &str) -> Option<&str> {
        self.keys_by_length
            .iter()
            .find(|key| stemmed_text.starts_with(key.as_str()))
            .map(String::as_str)
    }

    /// Whether any name maps to `law_id`.
    #[must_use]
    pub fn contains_value(&self, law_id: &LawId) -> bool {
        self.values.contains(law_id)
    }

    /// Stemmed names, longest first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys_by_length.iter().map(String::as_str)
    }

    /// Number of stemmed names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table holds no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// On-disk form of a law-name file: raw name to law id.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct LawNameFile(BTreeMap<String, String>);

impl LawNameFile {
    fn into_table(self, include_abbreviations: bool) -> LawLookupTable {
        let mut entries: Vec<(String, String)> = self.0.into_iter().collect();
        if include_abbreviations {
            let ids: Vec<(String, String)> = entries
                .iter()
                .map(|(_, id)| (id.clone(), id.clone()))
                .collect();
            entries.extend(ids);
        }
        LawLookupTable::build(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> LawLookupTable {
        LawLookupTable::build([("buergerlich gesetzbuch", "BGB"), ("grundgesetz", "GG")])
    }

    #[test]
    fn test_keys_sorted_by_descending_length() {
        let table = sample();
        assert_eq!(
            table.keys().collect::<Vec<_>>(),
            vec!["buergerlich gesetzbuch", "grundgesetz"]
        );
    }

    #[test]
    fn test_equal_length_keys_have_stable_order() {
        let table = LawLookupTable::build([("zpo", "ZPO"), ("bgb", "BGB"), ("stgb", "StGB")]);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["stgb", "bgb", "zpo"]);
    }

    #[test]
    fn test_match_law_name_prefers_longest() {
        let table = LawLookupTable::build([
            ("Sozialgesetzbuch", "SGB"),
            ("Sozialgesetzbuch Drittes Buch", "SGB-3"),
        ]);
        assert_eq!(
            table.match_law_name("sozialgesetzbuch dritt buch arbeitsfoerderung"),
            Some("sozialgesetzbuch dritt buch")
        );
        assert_eq!(table.match_law_name("sozialgesetzbuch"), Some("sozialgesetzbuch"));
    }

    #[test]
    fn test_match_law_name_is_literal_prefix() {
        let table = sample();
        assert_eq!(table.match_law_name("grundgesetzkommentar"), Some("grundgesetz"));
        assert_eq!(table.match_law_name("das grundgesetz"), None);
    }

    #[test]
    fn test_build_stems_names() {
        let table = LawLookupTable::build([("Bürgerliches Gesetzbuch", "BGB")]);
        assert!(table.get("buergerlich gesetzbuch").is_some());
        assert!(table.contains_value(&LawId::from("BGB")));
        assert!(!table.contains_value(&LawId::from("GG")));
    }

    #[test]
    fn test_later_entry_wins() {
        let table = LawLookupTable::build([("Grundgesetz", "GG"), ("Grundgesetzes", "GG-NEU")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("grundgesetz"), Some(&LawId::from("GG-NEU")));
        assert!(!table.contains_value(&LawId::from("GG")));
    }

    #[test]
    fn test_from_json_with_abbreviations() {
        let json = r#"{"Gerichtsverfassungsgesetz": "GVG", "Zivilprozessordnung": "ZPO"}"#;
        let table = LawLookupTable::from_json_str(json, true).unwrap();
        assert_eq!(table.get("gvg"), Some(&LawId::from("GVG")));
        assert_eq!(table.get("zivilprozessordnung"), Some(&LawId::from("ZPO")));

        let table = LawLookupTable::from_json_str(json, false).unwrap();
        assert!(table.get("gvg").is_none());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "Grundgesetz: GG\nStrafgesetzbuch: StGB\n";
        let table = LawLookupTable::from_yaml_str(yaml, false).unwrap();
        assert_eq!(table.get("strafgesetzbuch"), Some(&LawId::from("StGB")));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let err = LawLookupTable::load(Path::new("laws.csv"), false).unwrap_err();
        assert!(matches!(err, CitationError::UnsupportedLawNameFormat(_)));
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"Grundgesetz": "GG"}}"#).unwrap();
        let table = LawLookupTable::load(file.path(), false).unwrap();
        assert_eq!(table.get("grundgesetz"), Some(&LawId::from("GG")));
    }
}
