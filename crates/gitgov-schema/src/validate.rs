// gitgov-schema/src/validate.rs
// ============================================================================
// Module: Validators
// Description: Schema, detailed, and full envelope validation layers.
// Purpose: Implement the three validation layers every record type shares:
//          schema validation, field-level detailed validation, and full
//          envelope validation (schema + checksum + signatures).
// Dependencies: gitgov-core, jsonschema, serde, serde_json
// ============================================================================

//! ## Overview
//! Validation happens in three layers of increasing strictness:
//!
//! 1. **Schema** — does the JSON document conform to the record's JSON
//!    Schema at all?
//! 2. **Detailed** — the same check, translated into one
//!    [`gitgov_core::ValidationFieldError`] per offending field so a caller
//!    can report every problem at once, not just the first.
//! 3. **Full envelope validation** — schema-validate, then recompute the
//!    payload checksum and compare it against `header.payloadChecksum`, then
//!    verify every signature. Each step fails with a distinct
//!    [`gitgov_core::GitGovError`] variant so callers can tell a malformed
//!    document apart from a tampered one and from an unauthorized one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::Envelope;
use gitgov_core::GitGovError;
use gitgov_core::GitGovResult;
use gitgov_core::PublicKeyResolver;
use gitgov_core::RecordPayload;
use gitgov_core::RecordType;
use gitgov_core::ValidationFieldError;
use gitgov_core::payload_checksum;
use gitgov_core::verify_all_signatures;
use serde::Serialize;
use serde_json::Value;

use crate::registry::RegistryError;
use crate::registry::SchemaRegistry;

// ============================================================================
// SECTION: Detailed Validation Result
// ============================================================================

/// The outcome of a detailed (field-level) validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedValidationResult {
    /// True when no errors were found.
    pub is_valid: bool,
    /// Every field-level failure discovered. Empty when `is_valid`.
    pub errors: Vec<ValidationFieldError>,
}

impl DetailedValidationResult {
    /// An empty, passing result.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }
}

// ============================================================================
// SECTION: Schema / Detailed Validation
// ============================================================================

/// Schema-validates a full envelope document (`{header, payload}`) for
/// `record_type`, translating every schema error into a
/// [`ValidationFieldError`].
///
/// # Errors
///
/// Returns [`RegistryError`] when the schema for `record_type` fails to
/// compile or the registry's internal cache is poisoned.
pub fn validate_schema(
    registry: &SchemaRegistry,
    record_type: RecordType,
    envelope_value: &Value,
) -> Result<DetailedValidationResult, RegistryError> {
    let validator = registry.compile(record_type)?;
    let errors: Vec<ValidationFieldError> = validator
        .iter_errors(envelope_value)
        .map(|err| ValidationFieldError::new(err.instance_path.to_string(), err.to_string()))
        .collect();
    if errors.is_empty() {
        Ok(DetailedValidationResult::valid())
    } else {
        Ok(DetailedValidationResult {
            is_valid: false,
            errors,
        })
    }
}

/// Schema-validates a bare payload document (no envelope) for `record_type`,
/// translating every schema error into a [`ValidationFieldError`].
///
/// Factories call this before a payload has a header to wrap it in; once an
/// envelope exists, [`validate_full_embedded_metadata_record`] supersedes it.
///
/// # Errors
///
/// Returns [`RegistryError`] when the payload schema for `record_type` fails
/// to compile or the registry's internal cache is poisoned.
pub fn validate_payload_schema(
    registry: &SchemaRegistry,
    record_type: RecordType,
    payload_value: &Value,
) -> Result<DetailedValidationResult, RegistryError> {
    let validator = registry.compile_payload(record_type)?;
    let errors: Vec<ValidationFieldError> = validator
        .iter_errors(payload_value)
        .map(|err| ValidationFieldError::new(err.instance_path.to_string(), err.to_string()))
        .collect();
    if errors.is_empty() {
        Ok(DetailedValidationResult::valid())
    } else {
        Ok(DetailedValidationResult {
            is_valid: false,
            errors,
        })
    }
}

// ============================================================================
// SECTION: Full Envelope Validation
// ============================================================================

/// Runs the full three-step validation pipeline against an already-decoded
/// envelope: schema-validate, recompute and compare the payload checksum,
/// then verify every signature.
///
/// Per-type full validators (e.g. a hypothetical `validate_full_task_record`)
/// are just this function with `P` fixed to a concrete payload type; there is
/// nothing type-specific about the pipeline itself.
///
/// # Errors
///
/// - [`GitGovError::DetailedValidation`] when the envelope fails schema
///   validation.
/// - [`GitGovError::ChecksumMismatch`] when the declared `payloadChecksum`
///   does not match the canonical recomputation over `payload`.
/// - [`GitGovError::SignatureVerification`] when any signature fails to
///   verify or its signer's key cannot be resolved.
pub fn validate_full_embedded_metadata_record<P>(
    registry: &SchemaRegistry,
    envelope: &Envelope<P>,
    resolver: &impl PublicKeyResolver,
) -> GitGovResult<()>
where
    P: RecordPayload + Serialize,
{
    let record_type = P::RECORD_TYPE;
    let envelope_value = serde_json::to_value(envelope).map_err(|err| GitGovError::DetailedValidation {
        record_type: record_type.to_string(),
        errors: vec![ValidationFieldError::new("", err.to_string())],
    })?;

    let schema_result =
        validate_schema(registry, record_type, &envelope_value).map_err(|err| GitGovError::DetailedValidation {
            record_type: record_type.to_string(),
            errors: vec![ValidationFieldError::new("", err.to_string())],
        })?;
    if !schema_result.is_valid {
        return Err(GitGovError::DetailedValidation {
            record_type: record_type.to_string(),
            errors: schema_result.errors,
        });
    }

    let recomputed = payload_checksum(&envelope.payload).map_err(|err| GitGovError::DetailedValidation {
        record_type: record_type.to_string(),
        errors: vec![ValidationFieldError::new("/payload", err.to_string())],
    })?;
    if recomputed != envelope.header.payload_checksum {
        return Err(GitGovError::ChecksumMismatch {
            expected: envelope.header.payload_checksum.clone(),
            actual: recomputed,
        });
    }

    let failed_key_ids = verify_all_signatures(&envelope.header.signatures, &recomputed, resolver);
    if let Some(key_id) = failed_key_ids.into_iter().next() {
        return Err(GitGovError::SignatureVerification {
            key_id,
            reason: "signature did not verify or signer key could not be resolved".to_string(),
        });
    }

    Ok(())
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
    use gitgov_core::ActorKind;
    use gitgov_core::ActorPayload;
    use gitgov_core::ActorStatus;
    use gitgov_core::Header;
    use gitgov_core::PublicKeyResolver;
    use gitgov_core::generate_keypair;
    use gitgov_core::payload_checksum;
    use gitgov_core::sign;

    use super::validate_full_embedded_metadata_record;
    use super::validate_schema;
    use crate::registry::SchemaRegistry;

    struct SingleKeyResolver(String);

    impl PublicKeyResolver for SingleKeyResolver {
        fn resolve_public_key(&self, _key_id: &str) -> Option<String> {
            Some(self.0.clone())
        }
    }

    fn sample_actor() -> ActorPayload {
        ActorPayload {
            id: "human:alice".into(),
            kind: ActorKind::Human,
            display_name: "Alice".to_string(),
            public_key: "A".repeat(44),
            roles: vec!["author".to_string()],
            status: ActorStatus::Active,
            supersedes_id: None,
            superseded_by: None,
        }
    }

    #[test]
    fn well_formed_envelope_passes_schema_validation() {
        let registry = SchemaRegistry::new();
        let payload = sample_actor();
        let checksum = payload_checksum(&payload).unwrap();
        let keypair = generate_keypair();
        let signature = sign(&keypair, &checksum, "human:alice", "author", "").unwrap();
        let header = Header::new(gitgov_core::RecordType::Actor, checksum, signature);
        let envelope_value = serde_json::to_value(gitgov_core::Envelope::new(header, payload)).unwrap();

        let result = validate_schema(&registry, gitgov_core::RecordType::Actor, &envelope_value).unwrap();
        assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn full_validation_detects_tampered_payload() {
        let registry = SchemaRegistry::new();
        let payload = sample_actor();
        let checksum = payload_checksum(&payload).unwrap();
        let keypair = generate_keypair();
        let signature = sign(&keypair, &checksum, "human:alice", "author", "").unwrap();
        let header = Header::new(gitgov_core::RecordType::Actor, checksum, signature);
        let mut envelope = gitgov_core::Envelope::new(header, payload);
        envelope.payload.display_name = "Mallory".to_string();

        let resolver = SingleKeyResolver(envelope.payload.public_key.clone());
        let result = validate_full_embedded_metadata_record(&registry, &envelope, &resolver);
        assert!(matches!(result, Err(gitgov_core::GitGovError::ChecksumMismatch { .. })));
    }

    #[test]
    fn full_validation_passes_for_well_formed_signed_envelope() {
        let registry = SchemaRegistry::new();
        let payload = sample_actor();
        let checksum = payload_checksum(&payload).unwrap();
        let keypair = generate_keypair();
        let signature = sign(&keypair, &checksum, "human:alice", "author", "").unwrap();
        let header = Header::new(gitgov_core::RecordType::Actor, checksum, signature);
        let envelope = gitgov_core::Envelope::new(header, payload);

        let resolver = SingleKeyResolver(envelope.payload.public_key.clone());
        let result = validate_full_embedded_metadata_record(&registry, &envelope, &resolver);
        assert!(result.is_ok());
    }
}
