// gitgov-factory/src/envelope.rs
// ============================================================================
// Module: Envelope Factory
// Description: Shared checksum + single-signature envelope construction.
// Purpose: Give every per-type factory the same "compute checksum, attach
//          one signature" finishing step rather than each reimplementing it.
// Dependencies: gitgov-core
// ============================================================================

//! ## Overview
//! Per §4.5, an envelope factory "computes the checksum and attaches exactly
//! one signature using a supplied keypair, role, and notes". Every
//! `build_*_envelope` function in this crate is this one operation,
//! specialized only by which payload type it wraps.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::Envelope;
use gitgov_core::GitGovError;
use gitgov_core::GitGovResult;
use gitgov_core::Header;
use gitgov_core::Keypair;
use gitgov_core::RecordPayload;
use gitgov_core::ValidationFieldError;
use gitgov_core::payload_checksum;
use gitgov_core::sign;
use serde::Serialize;

// ============================================================================
// SECTION: Envelope Construction
// ============================================================================

/// Wraps `payload` in a freshly signed envelope: computes
/// `payloadChecksum`, signs it with `keypair` under `(key_id, role, notes)`,
/// and builds the `{header, payload}` envelope with exactly one signature.
///
/// # Errors
///
/// Returns [`GitGovError::DetailedValidation`] when `payload` cannot be
/// canonicalized (a bug in the payload type, not a caller error).
pub fn sign_new_envelope<P>(
    payload: P,
    keypair: &Keypair,
    key_id: &str,
    role: &str,
    notes: &str,
) -> GitGovResult<Envelope<P>>
where
    P: RecordPayload + Serialize,
{
    let checksum = payload_checksum(&payload).map_err(|err| GitGovError::DetailedValidation {
        record_type: P::RECORD_TYPE.to_string(),
        errors: vec![ValidationFieldError::new("", err.to_string())],
    })?;
    let signature = sign(keypair, &checksum, key_id, role, notes).map_err(|err| GitGovError::DetailedValidation {
        record_type: P::RECORD_TYPE.to_string(),
        errors: vec![ValidationFieldError::new("", err.to_string())],
    })?;
    let header = Header::new(P::RECORD_TYPE, checksum, signature);
    Ok(Envelope::new(header, payload))
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
    use gitgov_core::generate_keypair;
    use gitgov_core::verify_signature;

    use super::sign_new_envelope;

    #[test]
    fn envelope_carries_exactly_one_signature() {
        let keypair = generate_keypair();
        let payload = ActorPayload {
            id: "human:alice".into(),
            kind: ActorKind::Human,
            display_name: "Alice".to_string(),
            public_key: keypair.public_key.clone(),
            roles: vec!["author".to_string()],
            status: ActorStatus::Active,
            supersedes_id: None,
            superseded_by: None,
        };
        let envelope = sign_new_envelope(payload, &keypair, "human:alice", "author", "initial").unwrap();
        assert_eq!(envelope.header.signatures.len(), 1);
        assert!(verify_signature(
            &envelope.header.signatures[0],
            &envelope.header.payload_checksum,
            &keypair.public_key
        ));
    }
}
