//! Kinetyk build pipeline.
//!
//! One pipeline run is a single sequential pass:
//! Discover → Parse → Enrich → Validate → Version-delta → Persist.
//!
//! Parse and validation failures skip the offending source and the run
//! continues; I/O failures abort the run. Two concurrent runs against the
//! same dist directory are not safe (last writer wins on the ledger and
//! version files) — callers serialize runs externally.
//!
//! # Modules
//!
//! - [`discover`]: source file discovery
//! - [`version`]: content digests, the hash ledger, semantic versioning
//! - [`persist`]: artifact writing under the dist directory
//! - [`run`]: the run orchestration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod discover;
pub mod persist;
pub mod run;
pub mod version;

pub use persist::{Persister, ThumbnailManifest, load_ledger, load_version};
pub use run::{Pipeline, PipelineConfig, RunReport};
pub use version::{HashLedger, SemVer, content_digest, ledger_changed};
