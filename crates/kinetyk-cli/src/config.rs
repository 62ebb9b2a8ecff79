//! CLI configuration.
//!
//! One TOML file configures both halves of the system:
//!
//! ```toml
//! [pipeline]
//! content_dir = "content"
//! dist_dir = "dist"
//! schema_path = "schema/exercise.schema.json"
//!
//! [pipeline.enrich]
//! base_asset_url = "https://assets.example.com/exercises"
//! thumb_suffix = "-thumb"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 5730
//! ```
//!
//! Every field is defaulted, so an absent file (at the default location)
//! means "run with defaults". An explicitly given path must exist.

use kinetyk_api::ServerConfig;
use kinetyk_core::{Error, Result};
use kinetyk_pipeline::PipelineConfig;
use serde::Deserialize;
use std::path::Path;

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "kinetyk.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KinetykConfig {
    /// Build pipeline settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// API server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

impl KinetykConfig {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist; with the default path an
    /// absent file falls back to defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p, true),
            None => (DEFAULT_CONFIG_FILE, false),
        };

        if !Path::new(path).exists() {
            if required {
                return Err(Error::config(format!("config file not found: {path}")));
            }
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("failed to parse {path}: {e}")))
    }
}

// ============================================================================
// Tests
// ============================================================================
