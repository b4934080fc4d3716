// gitgov-core/src/record/metadata.rs
// ============================================================================
// Module: Open Metadata
// Description: Typed accessors over the duck-typed `metadata` field carried
//              by several record payloads.
// Purpose: Avoid ambient dynamism while still allowing callers to stash
//          arbitrary structured data on a record.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Task, agent, and feedback payloads expose an open `metadata` object. Each
//! caller typically wants to read back a specific shape from it, so rather
//! than modeling `metadata` as `serde_json::Value` everywhere, this module
//! wraps it in [`OpenMetadata`] and gives callers a generic, typed accessor.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Open Metadata
// ============================================================================

/// A typed map of JSON values attached to a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpenMetadata(Map<String, Value>);

impl OpenMetadata {
    /// Creates an empty metadata map.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Returns true when no keys are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Inserts a value under `key`, serializing it to JSON.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` when `value` cannot be serialized.
    pub fn set<T: Serialize>(&mut self, key: impl Into<String>, value: &T) -> serde_json::Result<()> {
        self.0.insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Reads a typed value back out of `key`.
    ///
    /// Returns `Ok(None)` when the key is absent, and an error when present
    /// but of the wrong shape.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` when the stored value cannot be
    /// deserialized as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> serde_json::Result<Option<T>> {
        self.0.get(key).cloned().map(serde_json::from_value).transpose()
    }

    /// Returns the raw JSON value stored under `key`, if any.
    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions are permitted."
)]
mod tests {
    use super::OpenMetadata;

    #[test]
    fn set_then_get_round_trips_typed_value() {
        let mut metadata = OpenMetadata::new();
        metadata.set("retries", &3u32).unwrap();
        let value: Option<u32> = metadata.get("retries").unwrap();
        assert_eq!(value, Some(3));
    }

    #[test]
    fn missing_key_returns_none() {
        let metadata = OpenMetadata::new();
        let value: Option<String> = metadata.get("absent").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn type_mismatch_surfaces_as_error() {
        let mut metadata = OpenMetadata::new();
        metadata.set("name", &"alice").unwrap();
        let result: serde_json::Result<Option<u32>> = metadata.get("name");
        assert!(result.is_err());
    }
}
