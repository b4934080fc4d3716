// gitgov-engine/src/registration.rs
// ============================================================================
// Module: Identity Registration
// Description: Backlog engine operations that bring actors and agents into
//              existence (§4.5, §4.9).
// Purpose: Implement `registerActor` and `registerAgent`, owning the
//          cross-record check the agent factory deliberately leaves open.
// Dependencies: gitgov-core, gitgov-factory, gitgov-identity, gitgov-schema,
//               crate::stores
// ============================================================================

//! ## Overview
//! [`gitgov_factory::build_agent_payload`] defaults a missing agent `id` to
//! the empty string rather than erroring, because a valid agent record
//! requires a pre-existing actor of kind `agent` — and checking a store for
//! that actor is an engine concern, not a factory concern (the factory
//! layer never touches a store). [`register_agent`] is where that check
//! actually happens: it requires an explicit `id`, loads the matching actor,
//! and rejects the registration if no such actor exists or it is not an
//! active actor of kind `agent`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::ActorRecord;
use gitgov_core::AgentRecord;
use gitgov_core::GitGovError;
use gitgov_core::GitGovResult;
use gitgov_factory::NewActorInput;
use gitgov_factory::NewAgentInput;
use gitgov_factory::build_actor_envelope;
use gitgov_factory::build_agent_envelope;
use gitgov_identity::require_active_agent;
use gitgov_schema::SchemaRegistry;

use crate::error::EngineError;
use crate::stores::Signer;
use crate::stores::Stores;

// ============================================================================
// SECTION: Actor Registration
// ============================================================================

/// Builds, validates, signs, and persists a new actor record.
///
/// # Errors
///
/// Returns [`gitgov_core::GitGovError::RequiredField`] or
/// [`gitgov_core::GitGovError::DetailedValidation`] when `input` fails
/// factory validation, or a store-specific I/O error.
pub fn register_actor(
    stores: &Stores,
    registry: &SchemaRegistry,
    signer: &Signer,
    input: NewActorInput,
    role: &str,
    notes: &str,
) -> GitGovResult<ActorRecord> {
    let envelope = build_actor_envelope(registry, input, &signer.keypair, signer.actor_id.as_str(), role, notes)?;
    stores.actors.put(envelope.payload.id.as_str(), &envelope)?;
    Ok(envelope)
}

// ============================================================================
// SECTION: Agent Registration
// ============================================================================

/// Builds, validates, signs, and persists a new agent record, first
/// confirming `input.id` names a pre-existing, active actor of kind
/// `agent` (via [`gitgov_identity::require_active_agent`]).
///
/// # Errors
///
/// Returns [`EngineError::LinkageViolation`] when `input.id` is absent,
/// [`gitgov_core::GitGovError::RecordNotFound`] when it does not resolve to
/// any actor, or [`gitgov_core::GitGovError::ProtocolViolation`] when the
/// actor is not an active agent; otherwise see [`register_actor`].
pub fn register_agent(
    stores: &Stores,
    registry: &SchemaRegistry,
    signer: &Signer,
    input: NewAgentInput,
    role: &str,
    notes: &str,
) -> GitGovResult<AgentRecord> {
    let Some(agent_id) = input.id.clone() else {
        return Err(EngineError::LinkageViolation {
            message: "agent id is required and must match a pre-existing actor of kind agent".to_string(),
        }
        .into());
    };
    let actor = stores
        .actors
        .get(agent_id.as_str())?
        .ok_or_else(|| GitGovError::RecordNotFound {
            record_type: "actor".to_string(),
            id: agent_id.as_str().to_string(),
        })?;
    require_active_agent(&actor.payload)?;

    let envelope = build_agent_envelope(registry, input, &signer.keypair, signer.actor_id.as_str(), role, notes)?;
    stores.agents.put(envelope.payload.id.as_str(), &envelope)?;
    Ok(envelope)
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
    use std::sync::Arc;

    use gitgov_core::ActorKind;
    use gitgov_core::ActorPayload;
    use gitgov_core::ActorStatus;
    use gitgov_core::AgentEngine;
    use gitgov_core::Envelope;
    use gitgov_core::GitGovError;
    use gitgov_core::Header;
    use gitgov_core::OpenMetadata;
    use gitgov_core::RecordType;
    use gitgov_core::generate_keypair;
    use gitgov_factory::NewActorInput;
    use gitgov_factory::NewAgentInput;
    use gitgov_store::InMemoryStore;

    use super::Stores;
    use super::register_actor;
    use super::register_agent;
    use crate::stores::Signer;

    fn stores() -> Stores {
        Stores::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
        )
    }

    fn author(stores: &Stores) -> Signer {
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
        let checksum = gitgov_core::payload_checksum(&payload).unwrap();
        let signature = gitgov_core::sign(&keypair, &checksum, "human:alice", "author", "").unwrap();
        let envelope = Envelope::new(Header::new(RecordType::Actor, checksum, signature), payload);
        stores.actors.put("human:alice", &envelope).unwrap();
        Signer::new("human:alice".into(), keypair)
    }

    #[test]
    fn register_agent_rejects_missing_id() {
        let stores = stores();
        let registry = gitgov_schema::SchemaRegistry::new();
        let signer = author(&stores);
        let input = NewAgentInput::new(AgentEngine::Local {
            config: OpenMetadata::new(),
        });
        let result = register_agent(&stores, &registry, &signer, input, "author", "");
        assert!(matches!(result, Err(GitGovError::ProtocolViolation { .. })));
    }

    #[test]
    fn register_agent_succeeds_for_existing_agent_actor() {
        let stores = stores();
        let registry = gitgov_schema::SchemaRegistry::new();
        let signer = author(&stores);

        let mut actor_input = NewActorInput::new("Reviewer Bot", "base64-public-key");
        actor_input.kind = ActorKind::Agent;
        actor_input.id = Some("agent:reviewer".into());
        register_actor(&stores, &registry, &signer, actor_input, "author", "").unwrap();

        let mut agent_input = NewAgentInput::new(AgentEngine::Local {
            config: OpenMetadata::new(),
        });
        agent_input.id = Some("agent:reviewer".into());
        let agent = register_agent(&stores, &registry, &signer, agent_input, "author", "").unwrap();
        assert_eq!(agent.payload.id.as_str(), "agent:reviewer");
    }
}
