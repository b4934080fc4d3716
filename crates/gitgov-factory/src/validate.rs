// gitgov-factory/src/validate.rs
// ============================================================================
// Module: Factory Validation Helper
// Description: Shared "serialize, schema-validate, fail with every error"
//              step every per-type factory runs after defaulting.
// Purpose: Avoid re-deriving the same serialize-then-validate boilerplate in
//          each factory module.
// Dependencies: gitgov-core, gitgov-schema, serde_json
// ============================================================================

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::GitGovError;
use gitgov_core::GitGovResult;
use gitgov_core::RecordPayload;
use gitgov_core::ValidationFieldError;
use gitgov_schema::SchemaRegistry;
use gitgov_schema::validate_payload_schema;
use serde::Serialize;

// ============================================================================
// SECTION: Required Field Guard
// ============================================================================

/// Fails with [`GitGovError::RequiredField`] when `value` is empty. Used for
/// fields a factory cannot default (§7, `RequiredFieldError`).
///
/// # Errors
///
/// Returns [`GitGovError::RequiredField`] when `value` is empty.
pub fn require_non_empty(record_type: &str, field: &str, value: &str) -> GitGovResult<()> {
    if value.is_empty() {
        Err(GitGovError::RequiredField {
            record_type: record_type.to_string(),
            field: field.to_string(),
        })
    } else {
        Ok(())
    }
}

// ============================================================================
// SECTION: Schema Validation
// ============================================================================

/// Runs the detailed payload validator for `payload` (§4.5 "Run the type's
/// detailed validator"), failing with every discovered error at once.
///
/// # Errors
///
/// Returns [`GitGovError::DetailedValidation`] when `payload` fails schema
/// validation or cannot be serialized to JSON.
pub fn validate_payload<P>(registry: &SchemaRegistry, payload: &P) -> GitGovResult<()>
where
    P: RecordPayload + Serialize,
{
    let record_type = P::RECORD_TYPE;
    let value = serde_json::to_value(payload).map_err(|err| GitGovError::DetailedValidation {
        record_type: record_type.to_string(),
        errors: vec![ValidationFieldError::new("", err.to_string())],
    })?;
    let result =
        validate_payload_schema(registry, record_type, &value).map_err(|err| GitGovError::DetailedValidation {
            record_type: record_type.to_string(),
            errors: vec![ValidationFieldError::new("", err.to_string())],
        })?;
    if result.is_valid {
        Ok(())
    } else {
        Err(GitGovError::DetailedValidation {
            record_type: record_type.to_string(),
            errors: result.errors,
        })
    }
}
