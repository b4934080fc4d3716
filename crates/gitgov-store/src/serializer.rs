// gitgov-store/src/serializer.rs
// ============================================================================
// Module: Record Serializer
// Description: Pluggable stringify/parse pair used by the filesystem store.
// Purpose: Let callers inject an alternate wire format while defaulting to
//          human-formatted JSON.
// Dependencies: gitgov-core, serde, serde_json
// ============================================================================

use std::marker::PhantomData;

use gitgov_core::GitGovError;
use gitgov_core::GitGovResult;
use gitgov_core::ValidationFieldError;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A pluggable stringify/parse pair for filesystem-persisted records.
pub trait RecordSerializer<T> {
    /// Serializes `value` to its on-disk string representation.
    ///
    /// # Errors
    ///
    /// Returns [`GitGovError`] when serialization fails.
    fn stringify(&self, value: &T) -> GitGovResult<String>;

    /// Parses a previously-stringified record back into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`GitGovError`] when `content` does not parse.
    fn parse(&self, content: &str) -> GitGovResult<T>;
}

/// The default serializer: two-space-indented, human-formatted JSON.
pub struct PrettyJsonSerializer<T> {
    marker: PhantomData<fn() -> T>,
}

impl<T> PrettyJsonSerializer<T> {
    /// Builds a new pretty-JSON serializer.
    #[must_use]
    pub const fn new() -> Self {
        Self { marker: PhantomData }
    }
}

impl<T> Default for PrettyJsonSerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize + DeserializeOwned> RecordSerializer<T> for PrettyJsonSerializer<T> {
    fn stringify(&self, value: &T) -> GitGovResult<String> {
        serde_json::to_string_pretty(value).map_err(|err| GitGovError::DetailedValidation {
            record_type: "store".to_string(),
            errors: vec![ValidationFieldError::new("", err.to_string())],
        })
    }

    fn parse(&self, content: &str) -> GitGovResult<T> {
        serde_json::from_str(content).map_err(|err| GitGovError::DetailedValidation {
            record_type: "store".to_string(),
            errors: vec![ValidationFieldError::new("", err.to_string())],
        })
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
    use super::PrettyJsonSerializer;
    use super::RecordSerializer;
    use serde::Deserialize;
    use serde::Serialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
    }

    #[test]
    fn stringify_then_parse_round_trips() {
        let serializer = PrettyJsonSerializer::<Sample>::new();
        let value = Sample { name: "alice".to_string() };
        let text = serializer.stringify(&value).unwrap();
        assert!(text.contains('\n'), "pretty JSON should be multi-line");
        let restored = serializer.parse(&text).unwrap();
        assert_eq!(restored, value);
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let serializer = PrettyJsonSerializer::<Sample>::new();
        assert!(serializer.parse("not json").is_err());
    }
}
