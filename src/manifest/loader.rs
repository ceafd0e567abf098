//! Manifest parsing from in-memory documents.
//!
//! No filesystem access: callers hand over a JSON value or document text.
//! Parse failures (unknown keys, wrong field types) surface as validation
//! errors, so a malformed document never reaches assembly.

use serde_json::Value;

use super::schema::Manifest;
use super::validation::ValidationError;

/// Lift a JSON value into a typed manifest.
pub fn from_value(document: Value) -> Result<Manifest, ValidationError> {
    serde_json::from_value(document).map_err(|e| ValidationError::Document(e.to_string()))
}

/// Parse a manifest from JSON text.
pub fn from_json(text: &str) -> Result<Manifest, ValidationError> {
    serde_json::from_str(text).map_err(|e| ValidationError::Document(e.to_string()))
}

/// Parse a manifest from TOML text.
pub fn from_toml(text: &str) -> Result<Manifest, ValidationError> {
    toml::from_str(text).map_err(|e| ValidationError::Document(e.to_string()))
}
