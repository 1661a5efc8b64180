//! Regex vocabulary of German statute citations.
//!
//! - `area`: trigger and main area grammar
//! - `law_name`: law names following a main area
//! - `citation`: tokens and unit names inside a main area

pub mod area;
pub mod citation;
pub mod law_name;
