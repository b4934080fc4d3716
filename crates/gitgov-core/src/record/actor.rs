// gitgov-core/src/record/actor.rs
// ============================================================================
// Module: Actor Payload
// Description: Identity records for humans and agents.
// Purpose: Carry the public key and capability roles signatures are checked
//          against.
// Dependencies: crate::record::{envelope, id}, serde
// ============================================================================

//! ## Overview
//! An actor is created once and never mutated; key rotation is modeled by a
//! new actor record that supersedes the old one via `supersedesId` /
//! `supersededBy` (see "Succession chains" in the workflow design notes).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::record::envelope::RecordPayload;
use crate::record::envelope::RecordType;
use crate::record::id::ActorId;

// ============================================================================
// SECTION: Actor Kind / Status
// ============================================================================

/// Whether an actor is a human operator or an autonomous agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    /// A human operator.
    Human,
    /// An autonomous or semi-autonomous agent.
    Agent,
}

/// Lifecycle status of an actor identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorStatus {
    /// The actor's key is current and its signatures are authoritative.
    Active,
    /// The actor has been superseded or retired; signatures from this actor
    /// no longer count toward authorization unless resolved through
    /// `supersededBy`.
    Revoked,
}

// ============================================================================
// SECTION: Payload
// ============================================================================

/// The `actor` record payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorPayload {
    /// Actor identifier, `{human|agent}:{slug}`.
    pub id: ActorId,
    /// Whether this actor is a human or an agent.
    #[serde(rename = "type")]
    pub kind: ActorKind,
    /// Human-readable display name.
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Raw 32-byte Ed25519 public key, base64-encoded.
    #[serde(rename = "publicKey")]
    pub public_key: String,
    /// Capability roles this actor may sign under. Must be non-empty.
    pub roles: Vec<String>,
    /// Lifecycle status.
    pub status: ActorStatus,
    /// The actor id this record supersedes, for key-rotation chains.
    #[serde(rename = "supersedesId", default, skip_serializing_if = "Option::is_none")]
    pub supersedes_id: Option<ActorId>,
    /// The actor id that supersedes this one, if any.
    #[serde(rename = "supersededBy", default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<ActorId>,
}

impl ActorPayload {
    /// Returns true when `role` is among this actor's capability roles.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

impl RecordPayload for ActorPayload {
    const RECORD_TYPE: RecordType = RecordType::Actor;

    fn id(&self) -> &str {
        self.id.as_str()
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
    use super::ActorKind;
    use super::ActorPayload;
    use super::ActorStatus;

    fn sample() -> ActorPayload {
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
    fn has_role_checks_membership() {
        let actor = sample();
        assert!(actor.has_role("author"));
        assert!(!actor.has_role("approver:quality"));
    }

    #[test]
    fn serializes_type_field_not_kind() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "human");
        assert!(json.get("kind").is_none());
    }
}
