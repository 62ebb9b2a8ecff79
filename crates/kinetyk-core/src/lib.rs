//! Kinetyk Core — shared types, errors, and utilities.
//!
//! This crate provides the foundational types used across all Kinetyk crates.
//! It has no internal Kinetyk dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`artifacts`]: Persisted artifact layout (file names under dist)
//! - [`error`]: Error taxonomy and Result alias
//! - [`model`]: The exercise record model and persisted artifact types
//! - [`util`]: ID normalization utilities

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod artifacts;
pub mod error;
pub mod model;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use model::{Dataset, Difficulty, Exercise, MobileMeta, VersionInfo, category_display_name};
pub use util::ids::{id_from_path, is_valid_id, normalize_id};
