// gitgov-core/src/record/envelope.rs
// ============================================================================
// Module: Envelope
// Description: The header + payload envelope shared by every record type.
// Purpose: Provide the canonical wire format for persisted GitGovernance
//          records.
// Dependencies: crate::crypto, serde
// ============================================================================

//! ## Overview
//! Every persisted record is an `EmbeddedMetadataRecord`: a `header` carrying
//! protocol version, record type, payload checksum, and an append-only
//! sequence of signatures, plus a record-type-specific `payload`. Semantics
//! rest entirely on the canonicalization of `payload`; header field order is
//! presentationally stable but not semantically significant.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::crypto::Signature;

// ============================================================================
// SECTION: Record Type
// ============================================================================

/// The record type carried in `header.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    /// A human or agent identity.
    Actor,
    /// An agent's operational configuration.
    Agent,
    /// A unit of work tracked through the workflow state machine.
    Task,
    /// A sprint or epic grouping tasks.
    Cycle,
    /// Immutable proof-of-work attached to a task.
    Execution,
    /// Immutable record of a completed transition.
    Changelog,
    /// A comment, blocker, or approval attached to another record.
    Feedback,
}

impl RecordType {
    /// Returns the canonical lowercase string used in `header.type`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Actor => "actor",
            Self::Agent => "agent",
            Self::Task => "task",
            Self::Cycle => "cycle",
            Self::Execution => "execution",
            Self::Changelog => "changelog",
            Self::Feedback => "feedback",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Header
// ============================================================================

/// The protocol envelope header shared by every record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Envelope protocol version, currently always `"1.0"`.
    pub version: String,
    /// The record type this header describes.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Lowercase hex SHA-256 of the canonical payload (64 characters).
    #[serde(rename = "payloadChecksum")]
    pub payload_checksum: String,
    /// Non-empty, ordered sequence of signatures. Signatures are additive:
    /// approvals, activations, and completions each append one; an envelope
    /// never loses a prior signature.
    pub signatures: Vec<Signature>,
    /// Schema URL for records of non-standard type.
    #[serde(rename = "schemaUrl", default, skip_serializing_if = "Option::is_none")]
    pub schema_url: Option<String>,
    /// Schema checksum for records of non-standard type.
    #[serde(rename = "schemaChecksum", default, skip_serializing_if = "Option::is_none")]
    pub schema_checksum: Option<String>,
}

/// The envelope protocol version emitted by this implementation.
pub const PROTOCOL_VERSION: &str = "1.0";

impl Header {
    /// Builds a header for `record_type` with a single initial signature.
    #[must_use]
    pub fn new(record_type: RecordType, payload_checksum: String, signature: Signature) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            record_type,
            payload_checksum,
            signatures: vec![signature],
            schema_url: None,
            schema_checksum: None,
        }
    }

    /// Appends a new signature to the header without disturbing prior
    /// signatures. Workflow transitions (approve, activate, complete) use
    /// this to grow the signature sequence in place.
    pub fn append_signature(&mut self, signature: Signature) {
        self.signatures.push(signature);
    }
}

// ============================================================================
// SECTION: Envelope
// ============================================================================

/// The `{header, payload}` envelope persisted for every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<P> {
    /// Protocol header.
    pub header: Header,
    /// Record-type-specific payload.
    pub payload: P,
}

impl<P> Envelope<P> {
    /// Wraps a header and payload into an envelope.
    #[must_use]
    pub const fn new(header: Header, payload: P) -> Self {
        Self {
            header,
            payload,
        }
    }
}

/// A record payload that knows its own envelope [`RecordType`] and logical
/// id. Implemented by every per-type payload struct so envelope-level code
/// (factories, validators, stores) can stay generic over `P`.
pub trait RecordPayload {
    /// The `header.type` value for envelopes wrapping this payload.
    const RECORD_TYPE: RecordType;

    /// Returns the payload's logical id (the file-name stem when persisted).
    fn id(&self) -> &str;
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
    use super::Header;
    use super::RecordType;
    use crate::crypto::Signature;

    fn sample_signature() -> Signature {
        Signature {
            key_id: "human:alice".to_string(),
            role: "author".to_string(),
            notes: "initial".to_string(),
            signature: "c2ln".to_string(),
            timestamp: 1_720_000_000,
        }
    }

    #[test]
    fn append_signature_preserves_prior_signatures() {
        let mut header = Header::new(RecordType::Task, "f".repeat(64), sample_signature());
        let mut second = sample_signature();
        second.role = "approver:quality".to_string();
        header.append_signature(second);
        assert_eq!(header.signatures.len(), 2);
        assert_eq!(header.signatures[0].role, "author");
        assert_eq!(header.signatures[1].role, "approver:quality");
    }

    #[test]
    fn record_type_round_trips_through_json() {
        let encoded = serde_json::to_string(&RecordType::Execution).unwrap();
        assert_eq!(encoded, "\"execution\"");
        let decoded: RecordType = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, RecordType::Execution);
    }
}
