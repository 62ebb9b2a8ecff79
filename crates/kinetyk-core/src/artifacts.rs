//! Persisted artifact layout.
//!
//! File and directory names under the dist directory, shared by the pipeline
//! (writer) and the query engine (reader).

/// Aggregate dataset file: `{version, lastUpdated, count, exercises[]}`.
pub const AGGREGATE_FILE: &str = "exercises.json";

/// Version metadata file: `{version, lastUpdated, exerciseCount}`.
pub const VERSION_FILE: &str = "version.json";

/// Hash ledger file: source path → content digest.
pub const LEDGER_FILE: &str = ".hashes.json";

/// Thumbnail manifest file: asset name → `{thumbnail, dimensions}`.
pub const THUMBNAILS_FILE: &str = "thumbnails.json";

/// Directory of per-record files keyed by id.
pub const RECORDS_DIR: &str = "exercises";

/// Directory of index files.
pub const INDEX_DIR: &str = "index";

/// Category index file: category → sorted id list.
pub const CATEGORIES_INDEX: &str = "categories.json";

/// Muscle index file over primary ∪ secondary muscles.
pub const MUSCLES_INDEX: &str = "muscles.json";

/// Equipment index file.
pub const EQUIPMENT_INDEX: &str = "equipment.json";
