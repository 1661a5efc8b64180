//! Error types for citation extraction and parsing.
//!
//! Expected absence (no citation found, law intentionally not resolved) is
//! modelled with `Option`; `CitationError` is reserved for structurally
//! invalid input and for misuse of the API.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::MatchKind;

/// Main error type for the normzitat library.
#[derive(Debug, Error)]
pub enum CitationError {
    /// A token is neither a unit, a numeral nor an ordinal word.
    #[error("Malformed token '{token}' in citation '{citation}'")]
    MalformedToken { token: String, citation: String },

    /// A string expected to be a unit abbreviation is not in the unit table.
    #[error("No unit matched: '{0}'")]
    NoUnitMatched(String),

    /// A numeral has no unit and none could be inferred from its neighbours.
    #[error("Cannot infer unit of '{value}' in citation '{citation}'")]
    UnitNotInferred { value: String, citation: String },

    /// An internal reference was resolved without a current law.
    #[error("Current law id must be set to resolve an internal reference")]
    InternalContextMissing,

    /// A law name classified as resolvable has no entry in the lookup tables.
    #[error("Law name '{law_text}' cannot be resolved as {kind}")]
    LawNameNotResolved { law_text: String, kind: MatchKind },

    /// Invalid law identifier.
    #[error("Invalid law id: '{0}'. Expected a non-empty id without surrounding whitespace")]
    InvalidLawId(String),

    /// Law-name file with an unknown extension.
    #[error("Unsupported law name file: {}. Expected .json, .yaml or .yml", .0.display())]
    UnsupportedLawNameFormat(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result type alias for normzitat operations.
pub type Result<T> = std::result::Result<T, CitationError>;
