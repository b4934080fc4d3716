// gitgov-core/src/crypto.rs
// ============================================================================
// Module: Crypto Module
// Description: Ed25519 keypair generation, signing, and verification.
// Purpose: Sign canonical payload checksums and verify envelope signatures.
// Dependencies: base64, ed25519-dalek, rand, sha2
// ============================================================================

//! ## Overview
//! Every signature is computed over a digest derived from a payload
//! checksum, not over the payload bytes directly. This lets a verifier
//! reconstruct the digest from `header.payloadChecksum` without needing the
//! payload in hand, and keeps checksum verification (tamper detection) a
//! separate step from signature verification (identity detection).
//!
//! Security posture: an unknown `keyId` is a verification failure, not an
//! exception — callers must not treat "can't find the key" as a different
//! code path than "the signature didn't verify".

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use ed25519_dalek::Signature as DalekSignature;
use ed25519_dalek::Signer;
use ed25519_dalek::SigningKey;
use ed25519_dalek::Verifier;
use ed25519_dalek::VerifyingKey;
use rand::rngs::OsRng;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by the crypto module.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A base64-encoded public or private key was malformed.
    #[error("malformed key material: {0}")]
    MalformedKey(String),
    /// A base64-encoded signature was malformed.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),
}

// ============================================================================
// SECTION: Keypair
// ============================================================================

/// An Ed25519 keypair, with the public key in the raw 32-byte base64 form
/// used throughout GitGovernance records.
#[derive(Debug, Clone)]
pub struct Keypair {
    /// Raw 32-byte Ed25519 public key, base64-encoded (44 chars).
    pub public_key: String,
    /// Signing key, retained for use with [`sign`].
    signing_key: SigningKey,
}

impl Keypair {
    /// Encodes the private signing key material for storage. Callers decide
    /// how and where to persist this; GitGovernance core does not dictate a
    /// key-file convention.
    #[must_use]
    pub fn private_key_base64(&self) -> String {
        BASE64.encode(self.signing_key.to_bytes())
    }

    /// Reconstructs a keypair from base64-encoded signing key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedKey`] when the material does not
    /// decode to 32 bytes.
    pub fn from_private_key_base64(encoded: &str) -> Result<Self, CryptoError> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|err| CryptoError::MalformedKey(err.to_string()))?;
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CryptoError::MalformedKey("expected 32 bytes".to_string()))?;
        let signing_key = SigningKey::from_bytes(&array);
        let public_key = BASE64.encode(signing_key.verifying_key().to_bytes());
        Ok(Self {
            public_key,
            signing_key,
        })
    }
}

/// Generates a new Ed25519 keypair.
///
/// The public key is returned as the raw 32-byte key, base64-encoded.
#[must_use]
pub fn generate_keypair() -> Keypair {
    let signing_key = SigningKey::generate(&mut OsRng);
    let public_key = BASE64.encode(signing_key.verifying_key().to_bytes());
    Keypair {
        public_key,
        signing_key,
    }
}

// ============================================================================
// SECTION: Signature
// ============================================================================

/// A signature object attached to an envelope header.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Signature {
    /// Identifier of the actor whose key produced this signature.
    #[serde(rename = "keyId")]
    pub key_id: String,
    /// Capability role the signer claims to act under (`author`,
    /// `approver:quality`, ...).
    pub role: String,
    /// Free-text note attached by the signer.
    pub notes: String,
    /// Base64-encoded Ed25519 signature bytes.
    pub signature: String,
    /// Unix-seconds timestamp used to reconstruct the signed digest.
    pub timestamp: i64,
}

/// Builds the digest string signed over: `"{checksum}:{keyId}:{role}:{notes}:{timestamp}"`.
fn digest_string(checksum: &str, key_id: &str, role: &str, notes: &str, timestamp: i64) -> String {
    format!("{checksum}:{key_id}:{role}:{notes}:{timestamp}")
}

/// Signs a payload checksum, returning a fully-formed [`Signature`].
///
/// `checksum` must already be `payload_checksum(payload)` (see
/// [`crate::canonical`]); this function does not recompute it, matching the
/// spec's separation between checksum computation and signing.
///
/// # Errors
///
/// This function is infallible given valid inputs; it returns `Result` for
/// forward compatibility with alternate signing backends.
pub fn sign(
    keypair: &Keypair,
    checksum: &str,
    key_id: &str,
    role: &str,
    notes: &str,
) -> Result<Signature, CryptoError> {
    let timestamp = unix_now();
    let digest = digest_string(checksum, key_id, role, notes, timestamp);
    let signature_bytes = keypair.signing_key.sign(digest.as_bytes());
    Ok(Signature {
        key_id: key_id.to_string(),
        role: role.to_string(),
        notes: notes.to_string(),
        signature: BASE64.encode(signature_bytes.to_bytes()),
        timestamp,
    })
}

/// Verifies a single signature against a known payload checksum and the
/// signer's raw 32-byte base64 public key.
///
/// Returns `false` (not an error) when the signature fails to verify, so
/// callers can aggregate multiple signature failures into a single
/// validation error. Malformed key or signature material is also treated as
/// a verification failure per the spec's "fail closed" posture.
#[must_use]
pub fn verify_signature(signature: &Signature, checksum: &str, public_key_base64: &str) -> bool {
    let Ok(public_bytes) = BASE64.decode(public_key_base64.trim()) else {
        return false;
    };
    let Ok(public_array): Result<[u8; 32], _> = public_bytes.try_into() else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_array) else {
        return false;
    };
    let Ok(signature_bytes) = BASE64.decode(signature.signature.trim()) else {
        return false;
    };
    let Ok(signature_array): Result<[u8; 64], _> = signature_bytes.try_into() else {
        return false;
    };
    let dalek_signature = DalekSignature::from_bytes(&signature_array);
    let digest = digest_string(
        checksum,
        &signature.key_id,
        &signature.role,
        &signature.notes,
        signature.timestamp,
    );
    verifying_key.verify(digest.as_bytes(), &dalek_signature).is_ok()
}

// ============================================================================
// SECTION: Public Key Resolution
// ============================================================================

/// Resolves an actor's raw public key (base64) by `keyId`, for signature
/// verification. Implemented by `gitgov-identity`'s key provider; defined
/// here so `gitgov-schema`'s validators can depend on the trait without
/// depending on the identity crate.
pub trait PublicKeyResolver {
    /// Returns the signer's base64-encoded public key, or `None` when the
    /// `keyId` does not resolve to a known actor. An unresolvable key is a
    /// verification failure, not an exception.
    fn resolve_public_key(&self, key_id: &str) -> Option<String>;
}

/// Verifies every signature in `signatures` against `checksum`, using
/// `resolver` to look up each signer's public key.
///
/// Returns the `keyId`s of every signature that failed to verify (either
/// because the key did not resolve or because the signature itself did not
/// verify). An empty result means every signature verified.
#[must_use]
pub fn verify_all_signatures(
    signatures: &[Signature],
    checksum: &str,
    resolver: &impl PublicKeyResolver,
) -> Vec<String> {
    signatures
        .iter()
        .filter_map(|signature| {
            let verifies = resolver
                .resolve_public_key(&signature.key_id)
                .is_some_and(|public_key| verify_signature(signature, checksum, &public_key));
            (!verifies).then(|| signature.key_id.clone())
        })
        .collect()
}

/// Returns the current unix-seconds timestamp.
fn unix_now() -> i64 {
    #[expect(clippy::cast_possible_wrap, reason = "unix seconds fit in i64 until year 292277026596")]
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default() as i64;
    secs
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
    use super::generate_keypair;
    use super::sign;
    use super::verify_signature;

    #[test]
    fn sign_then_verify_round_trips() {
        let keypair = generate_keypair();
        let checksum = "a".repeat(64);
        let signature = sign(&keypair, &checksum, "human:alice", "author", "initial").unwrap();
        assert!(verify_signature(&signature, &checksum, &keypair.public_key));
    }

    #[test]
    fn tampering_role_breaks_verification() {
        let keypair = generate_keypair();
        let checksum = "b".repeat(64);
        let mut signature = sign(&keypair, &checksum, "human:alice", "author", "initial").unwrap();
        signature.role = "approver".to_string();
        assert!(!verify_signature(&signature, &checksum, &keypair.public_key));
    }

    #[test]
    fn wrong_public_key_fails_verification() {
        let keypair = generate_keypair();
        let other = generate_keypair();
        let checksum = "c".repeat(64);
        let signature = sign(&keypair, &checksum, "human:alice", "author", "initial").unwrap();
        assert!(!verify_signature(&signature, &checksum, &other.public_key));
    }

    #[test]
    fn malformed_public_key_fails_closed() {
        let keypair = generate_keypair();
        let checksum = "d".repeat(64);
        let signature = sign(&keypair, &checksum, "human:alice", "author", "initial").unwrap();
        assert!(!verify_signature(&signature, &checksum, "not-base64!!"));
    }

    #[test]
    fn private_key_round_trips_through_base64() {
        let keypair = generate_keypair();
        let encoded = keypair.private_key_base64();
        let restored = super::Keypair::from_private_key_base64(&encoded).unwrap();
        assert_eq!(restored.public_key, keypair.public_key);
    }
}
