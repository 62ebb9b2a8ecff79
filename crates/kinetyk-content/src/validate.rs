//! Schema-contract validation.
//!
//! The schema document is an externally supplied JSON Schema; it is compiled
//! once per pipeline run and applied to every enriched record. Validation is
//! a pure function of (record, compiled schema): no side effects, and one
//! failing record never blocks the rest of the batch.

use kinetyk_core::model::Exercise;
use kinetyk_core::{Error, Result};
use std::path::Path;

/// A compiled schema contract.
pub struct SchemaValidator {
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    /// Compile a schema document.
    pub fn from_value(schema: &serde_json::Value) -> Result<Self> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|e| Error::config(format!("invalid schema document: {e}")))?;
        Ok(Self { validator })
    }

    /// Load and compile a schema document from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let schema: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| Error::config(format!("schema at {} is not JSON: {e}", path.display())))?;
        Self::from_value(&schema)
    }

    /// Validate an enriched record against the contract.
    ///
    /// Returns a `Validation` error carrying the record id and every
    /// instance-path-qualified failure.
    pub fn check(&self, record: &Exercise) -> Result<()> {
        let value = serde_json::to_value(record)
            .map_err(|e| Error::operation(format!("failed to serialize '{}': {e}", record.id)))?;
        self.check_value(&record.id, &value)
    }

    /// Validate an already-serialized record.
    pub fn check_value(&self, id: &str, value: &serde_json::Value) -> Result<()> {
        let errors: Vec<String> = self
            .validator
            .iter_errors(value)
            .map(|err| {
                let pointer = err.instance_path.to_string();
                if pointer.is_empty() {
                    format!("/: {err}")
                } else {
                    format!("{pointer}: {err}")
                }
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(id, errors))
        }
    }
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
