//! hs-core: stable foundation for heatscope.
//!
//! Contains:
//! - units (uom SI types + constructors, air constants)
//! - numeric (Real + tolerances + lenient text-to-number parsing)
//! - rules (ordered keyword tables for free-text inputs)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod rules;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HsError, HsResult};
pub use numeric::*;
pub use rules::{RuleTable, TextRule, contains_word, normalize_text};
pub use units::*;
