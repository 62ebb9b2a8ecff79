//! Source file discovery.

use kinetyk_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Discover markdown sources under the content directory.
///
/// Returns paths sorted lexicographically so a run processes sources in a
/// deterministic order. Unreadable directory entries are logged and skipped.
pub fn discover_sources(content_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/**/*.md", content_dir.display());
    let entries = glob::glob(&pattern)
        .map_err(|e| Error::config(format!("invalid content pattern '{pattern}': {e}")))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => tracing::warn!(error = %e, "skipping unreadable entry during discovery"),
        }
    }
    paths.sort();
    Ok(paths)
}

// ============================================================================
// Tests
// ============================================================================
