//! Pipeline run orchestration.

use crate::discover::discover_sources;
use crate::persist::{Dimensions, Persister, load_ledger, load_version, thumbnail_manifest};
use crate::version::{HashLedger, SemVer, content_digest, ledger_changed};
use chrono::Utc;
use kinetyk_content::enrich::{EnrichConfig, Enricher};
use kinetyk_content::markdown::parse_source;
use kinetyk_content::validate::SchemaValidator;
use kinetyk_core::model::{Dataset, VersionInfo};
use kinetyk_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory of markdown sources.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Directory the artifacts are written to.
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    /// The externally supplied schema contract.
    #[serde(default = "default_schema_path")]
    pub schema_path: PathBuf,

    /// Enrichment settings.
    #[serde(default)]
    pub enrich: EnrichConfig,
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_schema_path() -> PathBuf {
    PathBuf::from("schema/exercise.schema.json")
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            dist_dir: default_dist_dir(),
            schema_path: default_schema_path(),
            enrich: EnrichConfig::default(),
        }
    }
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Source files discovered.
    pub discovered: usize,
    /// Records that parsed, enriched, and validated.
    pub valid: usize,
    /// Sources skipped for format or validation failures.
    pub invalid: usize,
    /// Whether any source content changed since the prior run.
    pub changed: bool,
    /// Dataset version after this run.
    pub version: String,
}

/// The sequential build pipeline.
///
/// `run` performs one full pass. The pass is single-threaded by design;
/// concurrent runs against the same dist directory must be serialized by
/// the caller.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline from configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Discover, parse, enrich, validate, version, and persist.
    pub fn run(&self) -> Result<RunReport> {
        let validator = SchemaValidator::from_file(&self.config.schema_path)?;
        let enricher = Enricher::new(self.config.enrich.clone());

        let sources = discover_sources(&self.config.content_dir)?;
        tracing::info!(count = sources.len(), "discovered sources");

        let mut ledger = HashLedger::new();
        let mut exercises = Vec::new();
        let mut seen_ids: BTreeSet<String> = BTreeSet::new();
        let mut invalid = 0usize;

        for path in &sources {
            // Read failures are fatal: continuing would desynchronize the
            // ledger from the dataset.
            let content = std::fs::read_to_string(path)
                .map_err(|e| Error::io_with_path(e, path.clone()))?;

            let ledger_key = path
                .strip_prefix(&self.config.content_dir)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string();
            ledger.insert(ledger_key, content_digest(&content));

            let parsed = match parse_source(path, &content) {
                Ok(parsed) => parsed,
                Err(err) if err.is_record_local() => {
                    tracing::warn!(source = %path.display(), error = %err, "skipping source");
                    invalid += 1;
                    continue;
                }
                Err(err) => return Err(err),
            };

            let record = enricher.enrich(parsed);

            if !seen_ids.insert(record.id.clone()) {
                tracing::warn!(
                    source = %path.display(),
                    id = %record.id,
                    "skipping source with duplicate id"
                );
                invalid += 1;
                continue;
            }

            match validator.check(&record) {
                Ok(()) => exercises.push(record),
                Err(err) => {
                    tracing::warn!(source = %path.display(), error = %err, "skipping source");
                    invalid += 1;
                }
            }
        }

        exercises.sort_by(|a, b| a.id.cmp(&b.id));

        let prior_ledger = load_ledger(&self.config.dist_dir)?.unwrap_or_default();
        let changed = ledger_changed(&ledger, &prior_ledger);

        let version = match load_version(&self.config.dist_dir)? {
            Some(prior) => {
                let semver: SemVer = prior.version.parse()?;
                if changed { semver.bumped_patch() } else { semver }
            }
            None => SemVer::INITIAL,
        }
        .to_string();

        let now = Utc::now().to_rfc3339();
        let count = exercises.len();
        let dataset = Dataset {
            version: version.clone(),
            last_updated: now.clone(),
            count,
            exercises,
        };
        let manifest = thumbnail_manifest(
            &dataset.exercises,
            Dimensions {
                width: self.config.enrich.thumb_width,
                height: self.config.enrich.thumb_height,
            },
        );
        let version_info = VersionInfo {
            version: version.clone(),
            last_updated: now,
            exercise_count: count,
        };

        Persister::new(&self.config.dist_dir).persist(&dataset, &manifest, &version_info, &ledger)?;

        let report = RunReport {
            discovered: sources.len(),
            valid: count,
            invalid,
            changed,
            version,
        };
        tracing::info!(
            discovered = report.discovered,
            valid = report.valid,
            invalid = report.invalid,
            changed = report.changed,
            version = %report.version,
            "pipeline run complete"
        );
        Ok(report)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_schema(root: &Path) -> PathBuf {
        let schema = json!({
            "type": "object",
            "required": ["id", "name", "category", "primaryMuscles", "difficulty"],
            "properties": {
                "id": { "type": "string", "pattern": "^[a-z0-9]+(-[a-z0-9]+)*$" },
                "category": {
                    "enum": ["upper-body", "lower-body", "core", "cardio", "full-body", "flexibility"]
                },
                "primaryMuscles": { "type": "array", "minItems": 1 },
                "difficulty": { "enum": ["beginner", "intermediate", "advanced"] }
            }
        });
        let path = root.join("exercise.schema.json");
        std::fs::write(&path, serde_json::to_string_pretty(&schema).unwrap()).unwrap();
        path
    }

    fn write_source(content_dir: &Path, file: &str, name: &str, category: &str) {
        std::fs::create_dir_all(content_dir).unwrap();
        let content = format!(
            "---\nname: {name}\ncategory: {category}\nprimaryMuscles: [chest]\ndifficulty: beginner\n---\n\n## Description\n\nAbout {name}.\n"
        );
        std::fs::write(content_dir.join(file), content).unwrap();
    }

    fn pipeline(root: &Path) -> Pipeline {
        Pipeline::new(PipelineConfig {
            content_dir: root.join("content"),
            dist_dir: root.join("dist"),
            schema_path: write_schema(root),
            enrich: EnrichConfig::default(),
        })
    }

    fn read_version(root: &Path) -> VersionInfo {
        load_version(&root.join("dist")).unwrap().unwrap()
    }

    fn read_ledger(root: &Path) -> HashLedger {
        load_ledger(&root.join("dist")).unwrap().unwrap()
    }

    // ------------------------------------------------------------------------
    // First run tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_first_run_records_initial_version() {
        let root = TempDir::new().unwrap();
        write_source(&root.path().join("content"), "push-up.md", "Push-Up", "upper-body");

        let report = pipeline(root.path()).run().unwrap();
        assert_eq!(report.version, "1.0.0");
        assert_eq!(report.valid, 1);
        assert_eq!(report.invalid, 0);
        assert!(report.changed);
        assert_eq!(read_version(root.path()).exercise_count, 1);
    }

    #[test]
    fn test_invalid_source_skipped_run_continues() {
        let root = TempDir::new().unwrap();
        let content_dir = root.path().join("content");
        write_source(&content_dir, "push-up.md", "Push-Up", "upper-body");
        // Not in the category enum: fails validation, not parsing.
        write_source(&content_dir, "wrist-roll.md", "Wrist Roll", "grip-work");
        // No front matter at all: format error.
        std::fs::write(content_dir.join("notes.md"), "# stray notes").unwrap();

        let report = pipeline(root.path()).run().unwrap();
        assert_eq!(report.discovered, 3);
        assert_eq!(report.valid, 1);
        assert_eq!(report.invalid, 2);

        // Invalid sources still land in the ledger.
        let ledger = read_ledger(root.path());
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_duplicate_id_counts_invalid() {
        let root = TempDir::new().unwrap();
        let content_dir = root.path().join("content");
        write_source(&content_dir, "push-up.md", "Push-Up", "upper-body");
        // Explicit front matter id colliding with the other file's stem id.
        std::fs::write(
            content_dir.join("duplicate.md"),
            "---\nid: push-up\nname: Push-Up Again\ncategory: upper-body\nprimaryMuscles: [chest]\ndifficulty: beginner\n---\n\nBody",
        )
        .unwrap();

        let report = pipeline(root.path()).run().unwrap();
        assert_eq!(report.valid, 1);
        assert_eq!(report.invalid, 1);
    }

    // ------------------------------------------------------------------------
    // Idempotence and change detection tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_rerun_unchanged_keeps_version_and_ledger() {
        let root = TempDir::new().unwrap();
        write_source(&root.path().join("content"), "push-up.md", "Push-Up", "upper-body");
        let p = pipeline(root.path());

        p.run().unwrap();
        let ledger_before = read_ledger(root.path());

        let report = p.run().unwrap();
        assert!(!report.changed);
        assert_eq!(report.version, "1.0.0");
        assert_eq!(read_ledger(root.path()), ledger_before);
    }

    #[test]
    fn test_single_change_bumps_patch_and_one_entry() {
        let root = TempDir::new().unwrap();
        let content_dir = root.path().join("content");
        write_source(&content_dir, "push-up.md", "Push-Up", "upper-body");
        write_source(&content_dir, "squat.md", "Squat", "lower-body");
        let p = pipeline(root.path());

        p.run().unwrap();
        let before = read_ledger(root.path());

        // Modify exactly one source body.
        let path = content_dir.join("squat.md");
        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("\nExtra line.\n");
        std::fs::write(&path, content).unwrap();

        let report = p.run().unwrap();
        assert!(report.changed);
        assert_eq!(report.version, "1.0.1");

        let after = read_ledger(root.path());
        assert_eq!(after["push-up.md"], before["push-up.md"]);
        assert_ne!(after["squat.md"], before["squat.md"]);
    }

    #[test]
    fn test_removed_source_does_not_bump_but_prunes() {
        let root = TempDir::new().unwrap();
        let content_dir = root.path().join("content");
        write_source(&content_dir, "push-up.md", "Push-Up", "upper-body");
        write_source(&content_dir, "squat.md", "Squat", "lower-body");
        let p = pipeline(root.path());
        p.run().unwrap();

        std::fs::remove_file(content_dir.join("squat.md")).unwrap();
        let report = p.run().unwrap();

        assert!(!report.changed);
        assert_eq!(report.version, "1.0.0");
        assert!(!read_ledger(root.path()).contains_key("squat.md"));
        assert!(!root.path().join("dist/exercises/squat.json").exists());
        assert_eq!(read_version(root.path()).exercise_count, 1);
    }

    #[test]
    fn test_aggregate_sorted_by_id() {
        let root = TempDir::new().unwrap();
        let content_dir = root.path().join("content");
        write_source(&content_dir, "squat.md", "Squat", "lower-body");
        write_source(&content_dir, "push-up.md", "Push-Up", "upper-body");
        pipeline(root.path()).run().unwrap();

        let dataset: Dataset = serde_json::from_str(
            &std::fs::read_to_string(root.path().join("dist/exercises.json")).unwrap(),
        )
        .unwrap();
        let ids: Vec<&str> = dataset.exercises.iter().map(|ex| ex.id.as_str()).collect();
        assert_eq!(ids, vec!["push-up", "squat"]);
        assert_eq!(dataset.count, 2);
    }

    #[test]
    fn test_missing_schema_is_fatal() {
        let root = TempDir::new().unwrap();
        write_source(&root.path().join("content"), "push-up.md", "Push-Up", "upper-body");
        let p = Pipeline::new(PipelineConfig {
            content_dir: root.path().join("content"),
            dist_dir: root.path().join("dist"),
            schema_path: root.path().join("missing.schema.json"),
            enrich: EnrichConfig::default(),
        });
        assert!(p.run().is_err());
    }
}
