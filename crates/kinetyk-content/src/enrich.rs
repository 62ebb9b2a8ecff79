//! Record enrichment.
//!
//! Builds a full [`Exercise`] record from parser output: asset reference
//! normalization, difficulty ordinal, category display name, estimated
//! duration, per-image thumbnails, and the `updatedAt` stamp.

use crate::markdown::{ParsedExercise, Section};
use chrono::{DateTime, Utc};
use kinetyk_core::model::{Exercise, MobileMeta, category_display_name};
use serde::{Deserialize, Serialize};

/// Base exercise time in seconds, scaled by the difficulty multiplier.
const BASE_SECONDS: f64 = 30.0;

/// Body headings the enricher consumes, lower-cased.
const DESCRIPTION: &str = "description";
const INSTRUCTIONS: &str = "instructions";
const TIPS: &str = "tips";
const VARIATIONS: &str = "variations";

/// Enrichment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichConfig {
    /// Base location that out-of-tree asset paths are rebased onto.
    #[serde(default = "default_base_asset_url")]
    pub base_asset_url: String,

    /// Suffix inserted before the file extension of thumbnail references.
    #[serde(default = "default_thumb_suffix")]
    pub thumb_suffix: String,

    /// Thumbnail width in pixels (manifest metadata only; resizing itself
    /// is an external collaborator).
    #[serde(default = "default_thumb_width")]
    pub thumb_width: u32,

    /// Thumbnail height in pixels.
    #[serde(default = "default_thumb_height")]
    pub thumb_height: u32,
}

fn default_base_asset_url() -> String {
    "https://assets.kinetyk.dev/exercises".to_string()
}

fn default_thumb_suffix() -> String {
    "-thumb".to_string()
}

fn default_thumb_width() -> u32 {
    300
}

fn default_thumb_height() -> u32 {
    300
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            base_asset_url: default_base_asset_url(),
            thumb_suffix: default_thumb_suffix(),
            thumb_width: default_thumb_width(),
            thumb_height: default_thumb_height(),
        }
    }
}

/// Derives presentation metadata and normalizes asset references.
///
/// One enricher is built per pipeline run; every record it produces carries
/// the same `updatedAt` stamp.
#[derive(Debug, Clone)]
pub struct Enricher {
    config: EnrichConfig,
    generated_at: DateTime<Utc>,
}

impl Enricher {
    /// Create an enricher stamped with the current time.
    pub fn new(config: EnrichConfig) -> Self {
        Self::with_timestamp(config, Utc::now())
    }

    /// Create an enricher with an explicit generation time.
    pub fn with_timestamp(config: EnrichConfig, generated_at: DateTime<Utc>) -> Self {
        Self {
            config,
            generated_at,
        }
    }

    /// The configuration this enricher was built with.
    pub fn config(&self) -> &EnrichConfig {
        &self.config
    }

    /// Build the full record from parser output.
    pub fn enrich(&self, parsed: ParsedExercise) -> Exercise {
        let ParsedExercise {
            id,
            meta,
            mut sections,
            images,
            videos,
        } = parsed;

        let description = sections
            .remove(DESCRIPTION)
            .map(Section::into_text)
            .unwrap_or_default();
        let instructions = sections
            .remove(INSTRUCTIONS)
            .map(Section::into_items)
            .unwrap_or_default();
        let tips = sections.remove(TIPS).map(Section::into_items).unwrap_or_default();
        let variations = sections
            .remove(VARIATIONS)
            .map(Section::into_items)
            .unwrap_or_default();

        let images: Vec<String> = images.iter().map(|p| self.rebase_asset(p)).collect();
        let videos: Vec<String> = videos.iter().map(|p| self.rebase_asset(p)).collect();
        let thumbnails: Vec<String> = images
            .iter()
            .map(|image| thumbnail_ref(image, &self.config.thumb_suffix))
            .collect();

        let difficulty = meta.difficulty;
        let estimated_time = (BASE_SECONDS * difficulty.time_multiplier()).round() as u32;

        let mobile = MobileMeta {
            display_order: difficulty.ordinal(),
            category_display_name: category_display_name(&meta.category),
            estimated_time,
            has_video: !videos.is_empty(),
            thumbnails,
        };

        Exercise {
            id,
            name: meta.name,
            category: meta.category,
            primary_muscles: meta.primary_muscles,
            secondary_muscles: meta.secondary_muscles,
            equipment: meta.equipment,
            difficulty,
            tags: meta.tags,
            description,
            instructions,
            tips,
            variations,
            images,
            videos,
            mobile,
            updated_at: self.generated_at.to_rfc3339(),
        }
    }

    /// Rebase a reference that climbs out of the document's directory onto
    /// the configured base location. Already-absolute and same-directory
    /// forms pass through untouched.
    fn rebase_asset(&self, reference: &str) -> String {
        if !reference.starts_with("../") {
            return reference.to_string();
        }
        let mut rest = reference;
        while let Some(stripped) = rest.strip_prefix("../") {
            rest = stripped;
        }
        format!("{}/{rest}", self.config.base_asset_url.trim_end_matches('/'))
    }
}

/// Derive a thumbnail reference by inserting `suffix` immediately before
/// the file extension. A reference without an extension gets the suffix
/// appended.
///
/// # Examples
///
/// ```
/// use kinetyk_content::enrich::thumbnail_ref;
///
/// assert_eq!(thumbnail_ref("push-up.jpg", "-thumb"), "push-up-thumb.jpg");
/// assert_eq!(
///     thumbnail_ref("https://a.example.com/squat.png", "-thumb"),
///     "https://a.example.com/squat-thumb.png"
/// );
/// assert_eq!(thumbnail_ref("plain", "-thumb"), "plain-thumb");
/// ```
pub fn thumbnail_ref(image: &str, suffix: &str) -> String {
    let last_slash = image.rfind('/');
    match image.rfind('.') {
        Some(dot) if last_slash.is_none_or(|slash| dot > slash) => {
            format!("{}{suffix}{}", &image[..dot], &image[dot..])
        }
        _ => format!("{image}{suffix}"),
    }
}

// ============================================================================
// Tests
// ============================================================================
