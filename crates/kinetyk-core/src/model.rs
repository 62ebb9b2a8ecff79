//! The exercise record model and persisted artifact types.
//!
//! Records serialize with camelCase keys; the serialized form is the wire and
//! on-disk contract shared by the pipeline, the query engine, and the API.
//!
//! The `category` field stays a plain string on purpose: the closed category
//! enum is enforced by the externally supplied schema contract, and unknown
//! keys must be able to flow through enrichment into validation (where they
//! are rejected) instead of failing at parse time.

use serde::{Deserialize, Serialize};

/// Difficulty rating of an exercise.
///
/// Anything outside the three known ratings deserializes as [`Unknown`]
/// (`Difficulty::Unknown`) and is rejected later by schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Suitable for newcomers.
    Beginner,
    /// Some training experience assumed.
    Intermediate,
    /// Demanding form or strength prerequisites.
    Advanced,
    /// Not one of the known ratings.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Sort ordinal assigned to unknown difficulty; greater than every known
/// ordinal so unknown records sort last.
pub const UNKNOWN_DIFFICULTY_ORDER: u8 = 99;

impl Difficulty {
    /// Ordinal used for display ordering: beginner=1, intermediate=2,
    /// advanced=3, unknown sorts last.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
            Self::Unknown => UNKNOWN_DIFFICULTY_ORDER,
        }
    }

    /// Duration multiplier applied to the base exercise time.
    pub fn time_multiplier(self) -> f64 {
        match self {
            Self::Beginner | Self::Unknown => 1.0,
            Self::Intermediate => 1.2,
            Self::Advanced => 1.5,
        }
    }

    /// Lowercase wire name of the rating.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Unknown => "unknown",
        }
    }
}

/// Map a category key to its human display name.
///
/// Fixed lookup; unknown keys pass through unchanged.
///
/// # Examples
///
/// ```
/// use kinetyk_core::model::category_display_name;
///
/// assert_eq!(category_display_name("upper-body"), "Upper Body");
/// assert_eq!(category_display_name("mobility-drills"), "mobility-drills");
/// ```
pub fn category_display_name(key: &str) -> String {
    match key {
        "upper-body" => "Upper Body".to_string(),
        "lower-body" => "Lower Body".to_string(),
        "core" => "Core".to_string(),
        "cardio" => "Cardio".to_string(),
        "full-body" => "Full Body".to_string(),
        "flexibility" => "Flexibility".to_string(),
        other => other.to_string(),
    }
}

/// Presentation metadata derived for mobile clients.
///
/// `thumbnails[i]` corresponds positionally to the record's `images[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileMeta {
    /// Display ordering key (difficulty ordinal).
    pub display_order: u8,
    /// Human-readable category name.
    pub category_display_name: String,
    /// Estimated time per repetition set, in seconds.
    pub estimated_time: u32,
    /// Whether the record carries any video references.
    pub has_video: bool,
    /// One thumbnail reference per image, index-aligned.
    pub thumbnails: Vec<String>,
}

/// A fully enriched exercise record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Unique slug identifying the record across the dataset.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category key (closed enum enforced by the schema contract).
    pub category: String,
    /// Muscles primarily worked; never empty for a valid record.
    pub primary_muscles: Vec<String>,
    /// Muscles secondarily worked.
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
    /// Required equipment.
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Difficulty rating.
    pub difficulty: Difficulty,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Prose description.
    #[serde(default)]
    pub description: String,
    /// Ordered step-by-step instructions.
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Ordered coaching tips.
    #[serde(default)]
    pub tips: Vec<String>,
    /// Ordered exercise variations.
    #[serde(default)]
    pub variations: Vec<String>,
    /// Ordered image references.
    #[serde(default)]
    pub images: Vec<String>,
    /// Ordered video references.
    #[serde(default)]
    pub videos: Vec<String>,
    /// Derived presentation metadata.
    pub mobile: MobileMeta,
    /// RFC 3339 timestamp of the generating pipeline run.
    pub updated_at: String,
}

impl Exercise {
    /// Iterate the union of primary and secondary muscles.
    pub fn all_muscles(&self) -> impl Iterator<Item = &str> {
        self.primary_muscles
            .iter()
            .chain(self.secondary_muscles.iter())
            .map(String::as_str)
    }
}

/// The aggregate dataset artifact (`exercises.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Dataset semantic version.
    pub version: String,
    /// RFC 3339 timestamp of the generating run.
    pub last_updated: String,
    /// Number of records in the dataset.
    pub count: usize,
    /// All valid records, ordered by id.
    pub exercises: Vec<Exercise>,
}

/// The version metadata artifact (`version.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    /// Dataset semantic version.
    pub version: String,
    /// RFC 3339 timestamp of the last pipeline run.
    pub last_updated: String,
    /// Number of valid records at the last run.
    pub exercise_count: usize,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Difficulty tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_difficulty_ordinals() {
        assert_eq!(Difficulty::Beginner.ordinal(), 1);
        assert_eq!(Difficulty::Intermediate.ordinal(), 2);
        assert_eq!(Difficulty::Advanced.ordinal(), 3);
        assert!(Difficulty::Unknown.ordinal() > Difficulty::Advanced.ordinal());
    }

    #[test]
    fn test_difficulty_multipliers() {
        assert_eq!(Difficulty::Beginner.time_multiplier(), 1.0);
        assert_eq!(Difficulty::Intermediate.time_multiplier(), 1.2);
        assert_eq!(Difficulty::Advanced.time_multiplier(), 1.5);
        assert_eq!(Difficulty::Unknown.time_multiplier(), 1.0);
    }

    #[test]
    fn test_difficulty_deserializes_known() {
        let d: Difficulty = serde_json::from_str("\"intermediate\"").unwrap();
        assert_eq!(d, Difficulty::Intermediate);
    }

    #[test]
    fn test_difficulty_unknown_fallback() {
        let d: Difficulty = serde_json::from_str("\"expert\"").unwrap();
        assert_eq!(d, Difficulty::Unknown);
    }

    // ------------------------------------------------------------------------
    // Category display tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_category_display_known() {
        assert_eq!(category_display_name("lower-body"), "Lower Body");
        assert_eq!(category_display_name("cardio"), "Cardio");
    }

    #[test]
    fn test_category_display_unknown_passthrough() {
        assert_eq!(category_display_name("grip-work"), "grip-work");
    }

    // ------------------------------------------------------------------------
    // Serialization contract tests
    // ------------------------------------------------------------------------

    fn sample_exercise() -> Exercise {
        Exercise {
            id: "push-up".to_string(),
            name: "Push-Up".to_string(),
            category: "upper-body".to_string(),
            primary_muscles: vec!["chest".to_string()],
            secondary_muscles: vec!["triceps".to_string()],
            equipment: vec![],
            difficulty: Difficulty::Beginner,
            tags: vec!["bodyweight".to_string()],
            description: "A classic pressing movement.".to_string(),
            instructions: vec!["Lower".to_string(), "Press".to_string()],
            tips: vec![],
            variations: vec![],
            images: vec!["push-up.jpg".to_string()],
            videos: vec![],
            mobile: MobileMeta {
                display_order: 1,
                category_display_name: "Upper Body".to_string(),
                estimated_time: 30,
                has_video: false,
                thumbnails: vec!["push-up-thumb.jpg".to_string()],
            },
            updated_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_exercise_serializes_camel_case() {
        let value = serde_json::to_value(sample_exercise()).unwrap();
        assert!(value.get("primaryMuscles").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value["mobile"].get("displayOrder").is_some());
        assert!(value["mobile"].get("categoryDisplayName").is_some());
        assert!(value.get("primary_muscles").is_none());
    }

    #[test]
    fn test_all_muscles_union() {
        let ex = sample_exercise();
        let muscles: Vec<&str> = ex.all_muscles().collect();
        assert_eq!(muscles, vec!["chest", "triceps"]);
    }

    #[test]
    fn test_version_info_roundtrip() {
        let info = VersionInfo {
            version: "1.0.3".to_string(),
            last_updated: "2026-01-01T00:00:00+00:00".to_string(),
            exercise_count: 42,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"exerciseCount\":42"));
        let back: VersionInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
