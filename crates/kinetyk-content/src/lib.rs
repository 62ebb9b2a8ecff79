//! Kinetyk content processing.
//!
//! This crate turns one source file into a validated exercise record:
//!
//! - [`markdown`]: front matter extraction and body section capture
//! - [`enrich`]: presentation/mobile derivation and asset normalization
//! - [`validate`]: schema-contract validation of enriched records
//!
//! The schema document itself is an externally supplied contract; this crate
//! only consumes it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod enrich;
pub mod markdown;
pub mod validate;

// Re-export commonly used types
pub use enrich::{EnrichConfig, Enricher, thumbnail_ref};
pub use markdown::{ExerciseMeta, ParsedExercise, Section, parse_source};
pub use validate::SchemaValidator;
