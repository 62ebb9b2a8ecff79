//! In-memory snapshot of the persisted dataset.

use kinetyk_core::artifacts::AGGREGATE_FILE;
use kinetyk_core::model::{Dataset, Exercise};
use kinetyk_core::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// The last persisted dataset, loaded for serving.
///
/// Immutable after construction; share it behind an `Arc` across request
/// handlers. Reads never lock.
#[derive(Debug, Clone)]
pub struct Snapshot {
    dataset: Dataset,
    by_id: HashMap<String, usize>,
}

impl Snapshot {
    /// Load the aggregate artifact from a dist directory.
    pub fn load(dist_dir: &Path) -> Result<Self> {
        let path = dist_dir.join(AGGREGATE_FILE);
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        let dataset: Dataset = serde_json::from_str(&content)
            .map_err(|e| Error::operation(format!("invalid dataset at {}: {e}", path.display())))?;
        Ok(Self::from_dataset(dataset))
    }

    /// Build a snapshot from an in-memory dataset.
    pub fn from_dataset(dataset: Dataset) -> Self {
        let by_id = dataset
            .exercises
            .iter()
            .enumerate()
            .map(|(index, ex)| (ex.id.clone(), index))
            .collect();
        Self { dataset, by_id }
    }

    /// Dataset version.
    pub fn version(&self) -> &str {
        &self.dataset.version
    }

    /// Timestamp of the generating run.
    pub fn last_updated(&self) -> &str {
        &self.dataset.last_updated
    }

    /// All records, in aggregate order.
    pub fn exercises(&self) -> &[Exercise] {
        &self.dataset.exercises
    }

    /// Look up one record by id.
    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.by_id.get(id).map(|&index| &self.dataset.exercises[index])
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.dataset.exercises.len()
    }

    /// Whether the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.dataset.exercises.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kinetyk_core::model::{Difficulty, MobileMeta};
    use tempfile::TempDir;

    fn dataset() -> Dataset {
        Dataset {
            version: "1.0.2".to_string(),
            last_updated: "2026-01-15T12:00:00+00:00".to_string(),
            count: 1,
            exercises: vec![Exercise {
                id: "plank".to_string(),
                name: "Plank".to_string(),
                category: "core".to_string(),
                primary_muscles: vec!["abs".to_string()],
                secondary_muscles: vec![],
                equipment: vec![],
                difficulty: Difficulty::Beginner,
                tags: vec![],
                description: String::new(),
                instructions: vec![],
                tips: vec![],
                variations: vec![],
                images: vec![],
                videos: vec![],
                mobile: MobileMeta {
                    display_order: 1,
                    category_display_name: "Core".to_string(),
                    estimated_time: 30,
                    has_video: false,
                    thumbnails: vec![],
                },
                updated_at: "2026-01-15T12:00:00+00:00".to_string(),
            }],
        }
    }

    #[test]
    fn test_from_dataset_indexes_ids() {
        let snapshot = Snapshot::from_dataset(dataset());
        assert_eq!(snapshot.version(), "1.0.2");
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.get("plank").is_some());
        assert!(snapshot.get("missing").is_none());
    }

    #[test]
    fn test_load_roundtrip() {
        let dist = TempDir::new().unwrap();
        let ds = dataset();
        std::fs::write(
            dist.path().join(AGGREGATE_FILE),
            serde_json::to_string_pretty(&ds).unwrap(),
        )
        .unwrap();

        let snapshot = Snapshot::load(dist.path()).unwrap();
        assert_eq!(snapshot.version(), "1.0.2");
        assert_eq!(snapshot.get("plank").unwrap().name, "Plank");
    }

    #[test]
    fn test_load_missing_aggregate_is_io_error() {
        let dist = TempDir::new().unwrap();
        let err = Snapshot::load(dist.path()).unwrap_err();
        assert!(err.to_string().contains("exercises.json"));
    }
}
