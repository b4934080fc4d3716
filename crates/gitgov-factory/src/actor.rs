// gitgov-factory/src/actor.rs
// ============================================================================
// Module: Actor Factory
// Description: Defaulting, id generation, and validation for actor records.
// Purpose: Turn a partial actor input into a fully-formed, validated
//          `ActorPayload`, or a signed `ActorRecord` envelope.
// Dependencies: gitgov-core, gitgov-schema, crate::{envelope, slug, validate}
// ============================================================================

//! ## Overview
//! An actor's `id` defaults to `{human|agent}:{slug(display_name)}` when not
//! supplied. `roles` defaults to `["author"]` and `status` to `active`, per
//! §4.5.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::ActorId;
use gitgov_core::ActorKind;
use gitgov_core::ActorPayload;
use gitgov_core::ActorRecord;
use gitgov_core::ActorStatus;
use gitgov_core::GitGovResult;
use gitgov_core::Keypair;
use gitgov_schema::SchemaRegistry;

use crate::envelope::sign_new_envelope;
use crate::slug::prefixed_id;
use crate::validate::require_non_empty;
use crate::validate::validate_payload;

// ============================================================================
// SECTION: Input
// ============================================================================

/// Partial input accepted by [`build_actor_payload`].
#[derive(Debug, Clone)]
pub struct NewActorInput {
    /// Explicit id; generated from `display_name` when absent.
    pub id: Option<ActorId>,
    /// Whether this actor is a human or an agent.
    pub kind: ActorKind,
    /// Human-readable display name. Required; cannot be defaulted.
    pub display_name: String,
    /// Raw 32-byte Ed25519 public key, base64-encoded. Required.
    pub public_key: String,
    /// Capability roles. Defaults to `["author"]` when empty.
    pub roles: Vec<String>,
    /// Lifecycle status. Defaults to `active`.
    pub status: Option<ActorStatus>,
    /// The actor id this record supersedes, for key rotation.
    pub supersedes_id: Option<ActorId>,
}

impl NewActorInput {
    /// Builds a bare input for a human actor with the given display name
    /// and public key, leaving every defaultable field unset.
    #[must_use]
    pub fn new(display_name: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            id: None,
            kind: ActorKind::Human,
            display_name: display_name.into(),
            public_key: public_key.into(),
            roles: Vec::new(),
            status: None,
            supersedes_id: None,
        }
    }
}

// ============================================================================
// SECTION: Payload Factory
// ============================================================================

/// Builds and validates an [`ActorPayload`] from partial input, filling
/// defaults and generating an id when absent.
///
/// # Errors
///
/// Returns [`gitgov_core::GitGovError::RequiredField`] when `display_name`
/// or `public_key` is empty, or
/// [`gitgov_core::GitGovError::DetailedValidation`] when the resulting
/// payload fails schema validation.
pub fn build_actor_payload(registry: &SchemaRegistry, input: NewActorInput) -> GitGovResult<ActorPayload> {
    require_non_empty("actor", "displayName", &input.display_name)?;
    require_non_empty("actor", "publicKey", &input.public_key)?;

    let kind_prefix = match input.kind {
        ActorKind::Human => "human",
        ActorKind::Agent => "agent",
    };
    let id = input
        .id
        .unwrap_or_else(|| prefixed_id(kind_prefix, &input.display_name).into());
    let roles = if input.roles.is_empty() { vec!["author".to_string()] } else { input.roles };

    let payload = ActorPayload {
        id,
        kind: input.kind,
        display_name: input.display_name,
        public_key: input.public_key,
        roles,
        status: input.status.unwrap_or(ActorStatus::Active),
        supersedes_id: input.supersedes_id,
        superseded_by: None,
    };
    validate_payload(registry, &payload)?;
    Ok(payload)
}

// ============================================================================
// SECTION: Envelope Factory
// ============================================================================

/// Builds a validated [`ActorPayload`] and signs it into an [`ActorRecord`]
/// envelope with exactly one signature.
///
/// # Errors
///
/// See [`build_actor_payload`]; also propagates signing failures from
/// [`crate::envelope::sign_new_envelope`].
pub fn build_actor_envelope(
    registry: &SchemaRegistry,
    input: NewActorInput,
    keypair: &Keypair,
    key_id: &str,
    role: &str,
    notes: &str,
) -> GitGovResult<ActorRecord> {
    let payload = build_actor_payload(registry, input)?;
    sign_new_envelope(payload, keypair, key_id, role, notes)
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
    use gitgov_core::ActorStatus;
    use gitgov_core::generate_keypair;
    use gitgov_schema::SchemaRegistry;

    use super::NewActorInput;
    use super::build_actor_envelope;
    use super::build_actor_payload;

    fn input() -> NewActorInput {
        NewActorInput::new("Alice Liddell", "A".repeat(44))
    }

    #[test]
    fn defaults_id_roles_and_status() {
        let registry = SchemaRegistry::new();
        let payload = build_actor_payload(&registry, input()).unwrap();
        assert_eq!(payload.id.as_str(), "human:alice-liddell");
        assert_eq!(payload.roles, vec!["author".to_string()]);
        assert_eq!(payload.status, ActorStatus::Active);
    }

    #[test]
    fn rejects_missing_display_name() {
        let registry = SchemaRegistry::new();
        let mut bad = input();
        bad.display_name = String::new();
        assert!(build_actor_payload(&registry, bad).is_err());
    }

    #[test]
    fn envelope_is_signed_and_validates() {
        let registry = SchemaRegistry::new();
        let keypair = generate_keypair();
        let mut request = input();
        request.public_key = keypair.public_key.clone();
        let envelope = build_actor_envelope(&registry, request, &keypair, "human:alice-liddell", "author", "")
            .unwrap();
        assert_eq!(envelope.header.signatures.len(), 1);
    }
}
