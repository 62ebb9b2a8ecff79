//! ID normalization utilities.
//!
//! Record ids are lowercase kebab-case slugs. These helpers normalize
//! arbitrary names to that shape and derive fallback ids from source paths
//! when the front matter does not supply one.

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("invalid id pattern regex")
    })
}

/// Check whether an id is a well-formed slug.
///
/// # Examples
///
/// ```
/// use kinetyk_core::util::ids::is_valid_id;
///
/// assert!(is_valid_id("push-up"));
/// assert!(is_valid_id("plank"));
/// assert!(!is_valid_id("Push Up"));
/// assert!(!is_valid_id("-push-up"));
/// assert!(!is_valid_id(""));
/// ```
pub fn is_valid_id(id: &str) -> bool {
    id_pattern().is_match(id)
}

/// Normalize an identifier to lowercase kebab-case.
///
/// Trims, lowercases, converts underscores to hyphens, and collapses runs
/// of whitespace into single hyphens.
///
/// # Examples
///
/// ```
/// use kinetyk_core::util::ids::normalize_id;
///
/// assert_eq!(normalize_id("Bulgarian Split Squat"), "bulgarian-split-squat");
/// assert_eq!(normalize_id("push_up"), "push-up");
/// assert_eq!(normalize_id("  Box   Jump  "), "box-jump");
/// ```
pub fn normalize_id(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("-")
}

/// Compute an id from a source file path's stem.
///
/// Returns `None` if the path has no file stem.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use kinetyk_core::util::ids::id_from_path;
///
/// assert_eq!(
///     id_from_path(Path::new("content/Push_Up.md")),
///     Some("push-up".to_string())
/// );
/// assert_eq!(id_from_path(Path::new("/")), None);
/// ```
pub fn id_from_path(path: &Path) -> Option<String> {
    path.file_stem().and_then(|s| s.to_str()).map(normalize_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // is_valid_id tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_valid_ids() {
        assert!(is_valid_id("squat"));
        assert!(is_valid_id("push-up"));
        assert!(is_valid_id("90-90-stretch"));
    }

    #[test]
    fn test_invalid_ids() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("Push-Up"));
        assert!(!is_valid_id("push up"));
        assert!(!is_valid_id("push--up"));
        assert!(!is_valid_id("push-up-"));
        assert!(!is_valid_id("-push-up"));
    }

    // -------------------------------------------------------------------------
    // normalize_id tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_normalize_spaces() {
        assert_eq!(normalize_id("Goblet Squat"), "goblet-squat");
    }

    #[test]
    fn test_normalize_underscores() {
        assert_eq!(normalize_id("mountain_climber"), "mountain-climber");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize_id("  Jumping   Jack "), "jumping-jack");
    }

    #[test]
    fn test_normalize_idempotent() {
        assert_eq!(normalize_id("push-up"), "push-up");
    }

    #[test]
    fn test_normalized_ids_are_valid() {
        for name in ["Wall Sit", "dead_bug", "  Bear  Crawl "] {
            assert!(is_valid_id(&normalize_id(name)), "failed for {name:?}");
        }
    }

    // -------------------------------------------------------------------------
    // id_from_path tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_id_from_path() {
        assert_eq!(
            id_from_path(Path::new("content/upper/Push_Up.md")),
            Some("push-up".to_string())
        );
    }

    #[test]
    fn test_id_from_path_no_stem() {
        assert_eq!(id_from_path(Path::new("/")), None);
    }
}
