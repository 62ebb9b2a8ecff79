//! Content digests, the hash ledger, and dataset versioning.
//!
//! The digest is change-detection machinery, not a security primitive: any
//! collision-resistant-enough content hash works, and blake3 is what the
//! workspace already carries.
//!
//! The ledger maps source path → last-seen digest and is the sole input to
//! change detection. A run counts as changed iff any digest computed this
//! run differs from, or is absent from, the prior ledger; a source that
//! merely disappeared does not count (its entry simply drops out of the
//! refreshed ledger).

use kinetyk_core::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Source path → content digest, ordered for deterministic serialization.
pub type HashLedger = BTreeMap<String, String>;

/// Digest of one source file's content.
pub fn content_digest(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}

/// Whether this run's digests differ from the prior ledger.
pub fn ledger_changed(current: &HashLedger, prior: &HashLedger) -> bool {
    current
        .iter()
        .any(|(path, digest)| prior.get(path) != Some(digest))
}

/// A semantic version triple.
///
/// Pipeline runs only ever advance the patch component; major and minor are
/// reserved for operator-driven dataset revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemVer {
    /// Major component.
    pub major: u64,
    /// Minor component.
    pub minor: u64,
    /// Patch component.
    pub patch: u64,
}

impl SemVer {
    /// Version recorded by the first-ever pipeline run.
    pub const INITIAL: Self = Self {
        major: 1,
        minor: 0,
        patch: 0,
    };

    /// This version with the patch component incremented.
    pub fn bumped_patch(self) -> Self {
        Self {
            patch: self.patch + 1,
            ..self
        }
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SemVer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().splitn(3, '.');
        let mut component = |name: &str| -> Result<u64> {
            parts
                .next()
                .and_then(|p| p.parse().ok())
                .ok_or_else(|| Error::operation(format!("invalid semantic version '{s}': bad {name}")))
        };
        let major = component("major")?;
        let minor = component("minor")?;
        let patch = component("patch")?;
        Ok(Self {
            major,
            minor,
            patch,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
