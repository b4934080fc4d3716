// gitgov-core/src/error.rs
// ============================================================================
// Module: Error Taxonomy
// Description: Typed errors shared by every GitGovernance crate.
// Purpose: Give every layer (validators, factories, stores, engine) the same
//          named error kinds so front-ends can translate them uniformly.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! GitGovernance fails fast and carries every error discovered, not just the
//! first. Validators and factories return [`GitGovError::DetailedValidation`]
//! with one [`ValidationFieldError`] per offending field. Higher layers never
//! silently demote an error into a weaker kind; a front-end (CLI, MCP) is
//! responsible for turning these into exit codes or tool responses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Validation Field Error
// ============================================================================

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationFieldError {
    /// JSON-pointer-like path to the offending node (e.g. `/title`).
    pub field: String,
    /// Human-readable description of the failure.
    pub message: String,
    /// The offending value, when it can be captured.
    pub value: Option<Value>,
}

impl ValidationFieldError {
    /// Creates a field error without a captured value.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Creates a field error with a captured offending value.
    #[must_use]
    pub fn with_value(field: impl Into<String>, message: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Some(value),
        }
    }
}

// ============================================================================
// SECTION: Error Taxonomy
// ============================================================================

/// The named error kinds propagated throughout GitGovernance.
#[derive(Debug, Error)]
pub enum GitGovError {
    /// A record's payload or envelope failed schema or business-rule
    /// validation. Carries every error discovered, not just the first.
    #[error("{record_type} failed validation with {} error(s)", errors.len())]
    DetailedValidation {
        /// The record type under validation (`task`, `actor`, ...).
        record_type: String,
        /// Every field-level failure discovered.
        errors: Vec<ValidationFieldError>,
    },

    /// An envelope's declared `payloadChecksum` did not match the canonical
    /// recomputation over its payload.
    #[error("payload checksum mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch {
        /// The checksum declared in `header.payloadChecksum`.
        expected: String,
        /// The checksum recomputed from the canonical payload.
        actual: String,
    },

    /// At least one signature failed to verify, or its signer's public key
    /// could not be resolved.
    #[error("signature verification failed for key {key_id}: {reason}")]
    SignatureVerification {
        /// The `keyId` whose signature failed.
        key_id: String,
        /// Why verification failed.
        reason: String,
    },

    /// A referenced record could not be found in its store.
    #[error("{record_type} record not found: {id}")]
    RecordNotFound {
        /// The record type that was looked up.
        record_type: String,
        /// The id that was looked up.
        id: String,
    },

    /// A factory was invoked without a field it cannot default.
    #[error("{record_type} is missing required field: {field}")]
    RequiredField {
        /// The record type being constructed.
        record_type: String,
        /// The field that was missing.
        field: String,
    },

    /// A requested workflow transition is not permitted.
    #[error("protocol violation ({violation_type}): {message}")]
    ProtocolViolation {
        /// A stable, educational identifier for the kind of violation
        /// (e.g. `"unknown_transition"`, `"use_reject_instead"`).
        violation_type: String,
        /// A human-readable explanation.
        message: String,
    },

    /// A store id failed path-safety checks.
    #[error("invalid id {id:?}: {reason}")]
    InvalidId {
        /// The offending id.
        id: String,
        /// Why the id was rejected.
        reason: String,
    },

    /// A `.gitgov` project root could not be located.
    #[error("project root could not be located: {message}")]
    ProjectRoot {
        /// Explanation of the lookup failure.
        message: String,
    },
}

/// Convenience alias used throughout the GitGovernance crates.
pub type GitGovResult<T> = Result<T, GitGovError>;

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
    use super::GitGovError;
    use super::ValidationFieldError;

    #[test]
    fn detailed_validation_error_reports_count() {
        let err = GitGovError::DetailedValidation {
            record_type: "task".to_string(),
            errors: vec![
                ValidationFieldError::new("/title", "too short"),
                ValidationFieldError::new("/description", "too short"),
            ],
        };
        assert_eq!(err.to_string(), "task failed validation with 2 error(s)");
    }

    #[test]
    fn protocol_violation_carries_violation_type() {
        let err = GitGovError::ProtocolViolation {
            violation_type: "unknown_transition".to_string(),
            message: "no transition defined from draft".to_string(),
        };
        assert!(err.to_string().contains("unknown_transition"));
    }
}
