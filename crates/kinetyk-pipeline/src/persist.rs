//! Artifact persistence.
//!
//! Writes the dist directory in a fixed order so the aggregate is never
//! ahead of what readers can find per-record:
//!
//! 1. per-record files (stale ids pruned first),
//! 2. index files (categories, muscles, equipment),
//! 3. thumbnail manifest,
//! 4. aggregate dataset,
//! 5. version metadata,
//! 6. hash ledger.
//!
//! Any I/O failure here aborts the run; a partially written dist directory
//! is surfaced to the operator rather than papered over.

use crate::version::HashLedger;
use kinetyk_core::artifacts::{
    AGGREGATE_FILE, CATEGORIES_INDEX, EQUIPMENT_INDEX, INDEX_DIR, LEDGER_FILE, MUSCLES_INDEX,
    RECORDS_DIR, THUMBNAILS_FILE, VERSION_FILE,
};
use kinetyk_core::model::{Dataset, Exercise, VersionInfo};
use kinetyk_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Thumbnail pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// One thumbnail manifest entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailEntry {
    /// Thumbnail file name.
    pub thumbnail: String,
    /// Target dimensions for the (externally performed) resize.
    pub dimensions: Dimensions,
}

/// Asset file name → thumbnail entry.
pub type ThumbnailManifest = BTreeMap<String, ThumbnailEntry>;

/// Build the thumbnail manifest from the records' index-aligned image and
/// thumbnail lists.
pub fn thumbnail_manifest(exercises: &[Exercise], dimensions: Dimensions) -> ThumbnailManifest {
    let mut manifest = ThumbnailManifest::new();
    for exercise in exercises {
        for (image, thumbnail) in exercise.images.iter().zip(&exercise.mobile.thumbnails) {
            manifest.insert(
                file_name(image),
                ThumbnailEntry {
                    thumbnail: file_name(thumbnail),
                    dimensions,
                },
            );
        }
    }
    manifest
}

fn file_name(reference: &str) -> String {
    reference
        .rsplit('/')
        .next()
        .unwrap_or(reference)
        .to_string()
}

/// Writes all run artifacts under one dist directory.
#[derive(Debug, Clone)]
pub struct Persister {
    dist_dir: PathBuf,
}

impl Persister {
    /// Create a persister rooted at the dist directory.
    pub fn new(dist_dir: impl Into<PathBuf>) -> Self {
        Self {
            dist_dir: dist_dir.into(),
        }
    }

    /// Write every artifact for one run, in the documented order.
    pub fn persist(
        &self,
        dataset: &Dataset,
        manifest: &ThumbnailManifest,
        version: &VersionInfo,
        ledger: &HashLedger,
    ) -> Result<()> {
        let records_dir = self.dist_dir.join(RECORDS_DIR);
        let index_dir = self.dist_dir.join(INDEX_DIR);
        create_dir(&records_dir)?;
        create_dir(&index_dir)?;

        self.prune_stale_records(&records_dir, &dataset.exercises)?;
        for exercise in &dataset.exercises {
            write_json(&records_dir.join(format!("{}.json", exercise.id)), exercise)?;
        }

        write_json(
            &index_dir.join(CATEGORIES_INDEX),
            &build_index(&dataset.exercises, |ex| vec![ex.category.clone()]),
        )?;
        write_json(
            &index_dir.join(MUSCLES_INDEX),
            &build_index(&dataset.exercises, |ex| {
                ex.all_muscles().map(str::to_string).collect()
            }),
        )?;
        write_json(
            &index_dir.join(EQUIPMENT_INDEX),
            &build_index(&dataset.exercises, |ex| ex.equipment.clone()),
        )?;

        write_json(&self.dist_dir.join(THUMBNAILS_FILE), manifest)?;
        write_json(&self.dist_dir.join(AGGREGATE_FILE), dataset)?;
        write_json(&self.dist_dir.join(VERSION_FILE), version)?;
        write_json(&self.dist_dir.join(LEDGER_FILE), ledger)?;

        Ok(())
    }

    /// Remove per-record files whose id is no longer in the dataset.
    fn prune_stale_records(&self, records_dir: &Path, exercises: &[Exercise]) -> Result<()> {
        let live: BTreeSet<String> = exercises
            .iter()
            .map(|ex| format!("{}.json", ex.id))
            .collect();

        let entries =
            std::fs::read_dir(records_dir).map_err(|e| Error::io_with_path(e, records_dir))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::io_with_path(e, records_dir))?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(".json") && !live.contains(&name) {
                tracing::info!(record = %name, "pruning stale per-record file");
                std::fs::remove_file(entry.path())
                    .map_err(|e| Error::io_with_path(e, entry.path()))?;
            }
        }
        Ok(())
    }
}

/// Group record ids by the values `keys_of` yields per record.
fn build_index<F>(exercises: &[Exercise], keys_of: F) -> BTreeMap<String, Vec<String>>
where
    F: Fn(&Exercise) -> Vec<String>,
{
    let mut index: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for exercise in exercises {
        for key in keys_of(exercise) {
            index.entry(key).or_default().insert(exercise.id.clone());
        }
    }
    index
        .into_iter()
        .map(|(key, ids)| (key, ids.into_iter().collect()))
        .collect()
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::io_with_path(e, path))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| Error::operation(format!("failed to serialize {}: {e}", path.display())))?;
    std::fs::write(path, content).map_err(|e| Error::io_with_path(e, path))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| Error::operation(format!("invalid JSON at {}: {e}", path.display())))?;
    Ok(Some(value))
}

/// Load the prior version metadata, if any run has persisted one.
pub fn load_version(dist_dir: &Path) -> Result<Option<VersionInfo>> {
    read_json(&dist_dir.join(VERSION_FILE))
}

/// Load the prior hash ledger, if any run has persisted one.
pub fn load_ledger(dist_dir: &Path) -> Result<Option<HashLedger>> {
    read_json(&dist_dir.join(LEDGER_FILE))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kinetyk_core::model::{Difficulty, MobileMeta};
    use tempfile::TempDir;

    fn exercise(id: &str, category: &str, muscles: &[&str], equipment: &[&str]) -> Exercise {
        Exercise {
            id: id.to_string(),
            name: id.to_string(),
            category: category.to_string(),
            primary_muscles: muscles.iter().map(|m| m.to_string()).collect(),
            secondary_muscles: vec![],
            equipment: equipment.iter().map(|e| e.to_string()).collect(),
            difficulty: Difficulty::Beginner,
            tags: vec![],
            description: String::new(),
            instructions: vec![],
            tips: vec![],
            variations: vec![],
            images: vec![format!("{id}.jpg")],
            videos: vec![],
            mobile: MobileMeta {
                display_order: 1,
                category_display_name: category.to_string(),
                estimated_time: 30,
                has_video: false,
                thumbnails: vec![format!("{id}-thumb.jpg")],
            },
            updated_at: "2026-01-15T12:00:00+00:00".to_string(),
        }
    }

    fn dataset(exercises: Vec<Exercise>) -> Dataset {
        Dataset {
            version: "1.0.0".to_string(),
            last_updated: "2026-01-15T12:00:00+00:00".to_string(),
            count: exercises.len(),
            exercises,
        }
    }

    fn persist_all(dist: &Path, ds: &Dataset) {
        let manifest = thumbnail_manifest(&ds.exercises, Dimensions { width: 300, height: 300 });
        let version = VersionInfo {
            version: ds.version.clone(),
            last_updated: ds.last_updated.clone(),
            exercise_count: ds.count,
        };
        Persister::new(dist)
            .persist(ds, &manifest, &version, &HashLedger::new())
            .unwrap();
    }

    // ------------------------------------------------------------------------
    // Artifact layout tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_persist_writes_all_artifacts() {
        let dist = TempDir::new().unwrap();
        let ds = dataset(vec![
            exercise("push-up", "upper-body", &["chest"], &[]),
            exercise("squat", "lower-body", &["quads"], &["barbell"]),
        ]);
        persist_all(dist.path(), &ds);

        assert!(dist.path().join("exercises.json").exists());
        assert!(dist.path().join("exercises/push-up.json").exists());
        assert!(dist.path().join("exercises/squat.json").exists());
        assert!(dist.path().join("index/categories.json").exists());
        assert!(dist.path().join("index/muscles.json").exists());
        assert!(dist.path().join("index/equipment.json").exists());
        assert!(dist.path().join("thumbnails.json").exists());
        assert!(dist.path().join("version.json").exists());
        assert!(dist.path().join(".hashes.json").exists());
    }

    #[test]
    fn test_per_record_file_matches_aggregate_entry() {
        let dist = TempDir::new().unwrap();
        let ds = dataset(vec![exercise("push-up", "upper-body", &["chest"], &[])]);
        persist_all(dist.path(), &ds);

        let content =
            std::fs::read_to_string(dist.path().join("exercises/push-up.json")).unwrap();
        let record: Exercise = serde_json::from_str(&content).unwrap();
        assert_eq!(record, ds.exercises[0]);
    }

    #[test]
    fn test_indexes_group_ids() {
        let dist = TempDir::new().unwrap();
        let ds = dataset(vec![
            exercise("push-up", "upper-body", &["chest", "shoulders"], &[]),
            exercise("overhead-press", "upper-body", &["shoulders"], &["barbell"]),
        ]);
        persist_all(dist.path(), &ds);

        let categories: BTreeMap<String, Vec<String>> = serde_json::from_str(
            &std::fs::read_to_string(dist.path().join("index/categories.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(categories["upper-body"], vec!["overhead-press", "push-up"]);

        let muscles: BTreeMap<String, Vec<String>> = serde_json::from_str(
            &std::fs::read_to_string(dist.path().join("index/muscles.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(muscles["shoulders"], vec!["overhead-press", "push-up"]);
        assert_eq!(muscles["chest"], vec!["push-up"]);
    }

    #[test]
    fn test_stale_records_pruned() {
        let dist = TempDir::new().unwrap();
        persist_all(
            dist.path(),
            &dataset(vec![
                exercise("push-up", "upper-body", &["chest"], &[]),
                exercise("squat", "lower-body", &["quads"], &[]),
            ]),
        );
        assert!(dist.path().join("exercises/squat.json").exists());

        persist_all(
            dist.path(),
            &dataset(vec![exercise("push-up", "upper-body", &["chest"], &[])]),
        );
        assert!(dist.path().join("exercises/push-up.json").exists());
        assert!(!dist.path().join("exercises/squat.json").exists());
    }

    // ------------------------------------------------------------------------
    // Thumbnail manifest tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_thumbnail_manifest_uses_file_names() {
        let mut ex = exercise("squat", "lower-body", &["quads"], &[]);
        ex.images = vec!["https://assets.example.com/img/squat.jpg".to_string()];
        ex.mobile.thumbnails = vec!["https://assets.example.com/img/squat-thumb.jpg".to_string()];

        let manifest = thumbnail_manifest(&[ex], Dimensions { width: 160, height: 120 });
        let entry = &manifest["squat.jpg"];
        assert_eq!(entry.thumbnail, "squat-thumb.jpg");
        assert_eq!(entry.dimensions, Dimensions { width: 160, height: 120 });
    }

    // ------------------------------------------------------------------------
    // Load helper tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_load_helpers_absent() {
        let dist = TempDir::new().unwrap();
        assert!(load_version(dist.path()).unwrap().is_none());
        assert!(load_ledger(dist.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_version_roundtrip() {
        let dist = TempDir::new().unwrap();
        persist_all(
            dist.path(),
            &dataset(vec![exercise("push-up", "upper-body", &["chest"], &[])]),
        );
        let version = load_version(dist.path()).unwrap().unwrap();
        assert_eq!(version.version, "1.0.0");
        assert_eq!(version.exercise_count, 1);
    }
}
