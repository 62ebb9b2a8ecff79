//! Source file parsing.
//!
//! A source file is YAML front matter followed by a markdown body:
//!
//! ```markdown
//! ---
//! name: Push-Up
//! category: upper-body
//! primaryMuscles: [chest]
//! difficulty: beginner
//! ---
//!
//! ## Description
//!
//! A classic pressing movement.
//!
//! ## Instructions
//!
//! - Lower under control
//! - Press back up
//! ```
//!
//! [`parse_source`] is the entry point: it extracts the typed metadata, the
//! captured body sections, and the ordered image/video references.

pub mod frontmatter;
pub mod sections;

pub use frontmatter::{ExerciseMeta, extract_front_matter};
pub use sections::{BodyScan, Section, scan_body};

use kinetyk_core::util::ids::{id_from_path, is_valid_id, normalize_id};
use kinetyk_core::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Parser output for one source file.
#[derive(Debug, Clone)]
pub struct ParsedExercise {
    /// Record id: the front matter id when given, otherwise derived from
    /// the file stem. Always a well-formed slug.
    pub id: String,
    /// Typed front matter metadata.
    pub meta: ExerciseMeta,
    /// Lower-cased heading text → captured section content.
    pub sections: BTreeMap<String, Section>,
    /// Ordered image references, in body order.
    pub images: Vec<String>,
    /// Ordered video references, in body order.
    pub videos: Vec<String>,
}

/// Parse one source file into its metadata, sections, and asset references.
///
/// Fails with a format error (carrying the source path) when the front
/// matter delimiters are absent, the metadata does not deserialize, or no
/// well-formed id can be derived.
pub fn parse_source(path: &Path, content: &str) -> Result<ParsedExercise> {
    let shown_path = path.display().to_string();

    let (yaml, body) = extract_front_matter(&shown_path, content)?;
    let meta: ExerciseMeta = serde_yaml::from_str(yaml)
        .map_err(|e| Error::format(&shown_path, format!("invalid front matter: {e}")))?;

    let id = match &meta.id {
        Some(raw) => {
            let id = normalize_id(raw);
            if !is_valid_id(&id) {
                return Err(Error::format(
                    &shown_path,
                    format!("front matter id '{raw}' is not a valid slug"),
                ));
            }
            id
        }
        None => id_from_path(path).filter(|id| is_valid_id(id)).ok_or_else(|| {
            Error::format(&shown_path, "no id in front matter and file stem is not a valid slug")
        })?,
    };

    let scan = scan_body(body);

    Ok(ParsedExercise {
        id,
        meta,
        sections: scan.sections,
        images: scan.images,
        videos: scan.videos,
    })
}

// ============================================================================
// Tests
// ============================================================================
