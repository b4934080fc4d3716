// gitgov-core/src/canonical.rs
// ============================================================================
// Module: Canonical Serializer
// Description: RFC 8785 JSON canonicalization and payload checksum utilities.
// Purpose: Provide deterministic hashes for record payloads.
// Dependencies: serde, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! Every persisted record's `payloadChecksum` is the lowercase hex SHA-256 of
//! the payload's canonical JSON bytes. Canonicalization recursively sorts
//! mapping keys by Unicode code point and preserves sequence order; numbers
//! are emitted in their shortest round-trippable form. This module owns that
//! single guarantee and nothing else — it is a total function over any
//! JSON-compatible value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while computing canonical payload bytes or checksums.
#[derive(Debug, Error)]
pub enum CanonicalizeError {
    /// The value could not be serialized to canonical JSON.
    #[error("failed to canonicalize payload: {0}")]
    Serialize(String),
}

// ============================================================================
// SECTION: Canonical Bytes
// ============================================================================

/// Returns the canonical JSON bytes for a serializable value.
///
/// Mappings are emitted with keys sorted by Unicode code point and every
/// nested value canonicalized recursively; sequences preserve element
/// order. The output is compact UTF-8 with no insignificant whitespace.
///
/// # Errors
///
/// Returns [`CanonicalizeError::Serialize`] when the value cannot be
/// serialized.
pub fn canonicalize<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CanonicalizeError> {
    serde_jcs::to_vec(value).map_err(|err| CanonicalizeError::Serialize(err.to_string()))
}

// ============================================================================
// SECTION: Payload Checksum
// ============================================================================

/// Computes `lowercase_hex(sha256(canonicalize(payload)))`.
///
/// # Errors
///
/// Returns [`CanonicalizeError::Serialize`] when the payload cannot be
/// canonicalized.
pub fn payload_checksum<T: Serialize + ?Sized>(payload: &T) -> Result<String, CanonicalizeError> {
    let bytes = canonicalize(payload)?;
    Ok(sha256_hex(&bytes))
}

/// Hashes raw bytes with SHA-256 and returns the lowercase hex digest.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex_encode(&hasher.finalize())
}

// ============================================================================
// SECTION: Hex Encoding
// ============================================================================

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
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
    use serde_json::json;

    use super::canonicalize;
    use super::payload_checksum;

    #[test]
    fn key_order_does_not_affect_canonical_bytes() {
        let a = json!({"id": "1752274500-task-t", "title": "T", "status": "draft"});
        let b = json!({"status": "draft", "id": "1752274500-task-t", "title": "T"});
        assert_eq!(canonicalize(&a).unwrap(), canonicalize(&b).unwrap());
        assert_eq!(payload_checksum(&a).unwrap(), payload_checksum(&b).unwrap());
    }

    #[test]
    fn checksum_is_64_lowercase_hex_chars() {
        let digest = payload_checksum(&json!({"a": 1})).unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn array_order_is_significant() {
        let a = json!({"tags": ["a", "b"]});
        let b = json!({"tags": ["b", "a"]});
        assert_ne!(canonicalize(&a).unwrap(), canonicalize(&b).unwrap());
    }

    #[test]
    fn nested_structures_canonicalize_recursively() {
        let a = json!({"outer": {"z": 1, "a": {"y": 2, "b": 3}}});
        let b = json!({"outer": {"a": {"b": 3, "y": 2}, "z": 1}});
        assert_eq!(canonicalize(&a).unwrap(), canonicalize(&b).unwrap());
    }
}
