//! Normzitat - Extract and decode citations of German statutes.
//!
//! This crate finds citations like "§ 123 Abs. 4 Satz 5 und 6 des
//! Bürgerlichen Gesetzbuches" in legal text, decodes the cited parts into
//! reference paths and resolves the cited law to a caller-defined id.
//!
//! # Example
//!
//! ```
//! use normzitat::{CitationEngine, LawId, LawLookupTable};
//!
//! let lookup = LawLookupTable::build([("Bürgerliches Gesetzbuch", "BGB")]);
//! let engine = CitationEngine::new(lookup);
//!
//! let text = "Es gilt § 123 Abs. 4 Satz 5 und 6 des Bürgerlichen Gesetzbuches.";
//! let citation = engine.citations(text, None).next().unwrap().unwrap();
//! assert_eq!(citation.law_id, Some(LawId::from("BGB")));
//! assert_eq!(citation.paths.len(), 2);
//! assert_eq!(citation.paths[1].to_string(), "§ 123 Abs 4 Satz 6");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and validation
//! - [`types`]: Core data types (matches, reference paths, units)
//! - [`error`]: Error types and Result alias
//! - [`stemming`]: Normalization of law names
//! - [`lookup`]: Lookup table of stemmed law names
//! - [`patterns`]: Regex vocabulary of citations
//! - [`extractor`]: Locating citations and classifying law names
//! - [`parser`]: Decoding main areas and resolving law names
//! - [`engine`]: Extraction, parsing and resolution in one pass
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod lookup;
pub mod parser;
pub mod patterns;
pub mod stemming;
pub mod types;

// Re-export main entry points
pub use engine::CitationEngine;
pub use extractor::StatutesExtractor;
pub use parser::{parse_main, parse_main_detailed, stem_unit, LawResolver};

// Re-export commonly used items
pub use error::{CitationError, Result};
pub use lookup::LawLookupTable;
pub use stemming::stem_law_name;
pub use types::{Citation, LawId, MatchKind, PathComponent, ReferencePath, StatuteMatch, Unit};
