//! YAML front matter extraction.
//!
//! Front matter is the metadata block at the start of a source file,
//! delimited by `---` lines. Unlike lenient readers, a source file without
//! both delimiters is a format error here: the pipeline counts it invalid
//! and moves on.

use kinetyk_core::model::Difficulty;
use kinetyk_core::{Error, Result};
use serde::Deserialize;

/// Typed front matter for one exercise source.
///
/// Collection fields accept YAML flow lists (`[a, b]`) as well as block
/// lists. Unknown difficulty strings deserialize to
/// [`Difficulty::Unknown`] and fail later at schema validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseMeta {
    /// Explicit record id; falls back to the file stem when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Category key.
    pub category: String,
    /// Muscles primarily worked.
    #[serde(default)]
    pub primary_muscles: Vec<String>,
    /// Muscles secondarily worked.
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
    /// Required equipment.
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Difficulty rating.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Split a source file into its raw YAML front matter and body.
///
/// The file must start with a `---` line and contain a closing `---` line;
/// either being absent is a format error carrying `path`.
///
/// # Example
///
/// ```
/// use kinetyk_content::markdown::frontmatter::extract_front_matter;
///
/// let content = "---\nname: Plank\ncategory: core\n---\n\n## Description\n";
/// let (yaml, body) = extract_front_matter("plank.md", content).unwrap();
/// assert!(yaml.contains("name: Plank"));
/// assert!(body.contains("## Description"));
/// ```
pub fn extract_front_matter<'a>(path: &str, content: &'a str) -> Result<(&'a str, &'a str)> {
    if !content.starts_with("---") {
        return Err(Error::format(path, "missing front matter opening delimiter"));
    }

    // Skip past the opening --- line
    let after_opening = match content[3..].find('\n') {
        Some(pos) => &content[3 + pos + 1..],
        None => return Err(Error::format(path, "missing front matter closing delimiter")),
    };

    // Empty front matter (--- immediately) or content up to \n---
    let (yaml, after_closing) = if let Some(rest) = after_opening.strip_prefix("---") {
        ("", rest)
    } else if let Some(closing) = after_opening.find("\n---") {
        (&after_opening[..closing], &after_opening[closing + 4..])
    } else {
        return Err(Error::format(path, "missing front matter closing delimiter"));
    };

    let body = after_closing.strip_prefix('\n').unwrap_or(after_closing);
    Ok((yaml, body))
}

// ============================================================================
// Tests
// ============================================================================
