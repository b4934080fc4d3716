// gitgov-factory/src/agent.rs
// ============================================================================
// Module: Agent Factory
// Description: Defaulting, id generation, and validation for agent records.
// Purpose: Turn a partial agent input into a fully-formed, validated
//          `AgentPayload`, or a signed `AgentRecord` envelope.
// Dependencies: gitgov-core, gitgov-schema, crate::{envelope, validate}
// ============================================================================

//! ## Overview
//! Per §4.5 and the spec's "Open Questions", an agent's `id` defaults to the
//! empty string when no actor id is supplied — a deliberate tripwire rather
//! than a convenience, since a valid agent record requires a pre-existing
//! actor id and that cross-record check is the engine's job, not the
//! factory's.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gitgov_core::ActorStatus;
use gitgov_core::AgentEngine;
use gitgov_core::AgentId;
use gitgov_core::AgentPayload;
use gitgov_core::AgentRecord;
use gitgov_core::GitGovResult;
use gitgov_core::Keypair;
use gitgov_core::OpenMetadata;
use gitgov_schema::SchemaRegistry;

use crate::envelope::sign_new_envelope;
use crate::validate::validate_payload;

// ============================================================================
// SECTION: Input
// ============================================================================

/// Partial input accepted by [`build_agent_payload`].
#[derive(Debug, Clone)]
pub struct NewAgentInput {
    /// Agent id; must match a pre-existing actor of kind agent. Defaults to
    /// the empty string when absent (see module docs).
    pub id: Option<AgentId>,
    /// How this agent is invoked. Required; cannot be defaulted.
    pub engine: AgentEngine,
    /// Lifecycle status. Defaults to `active`.
    pub status: Option<ActorStatus>,
    /// Conditions that activate this agent. Defaults to empty.
    pub triggers: Vec<gitgov_core::AgentTrigger>,
    /// Knowledge sources this agent depends on. Defaults to empty.
    pub knowledge_dependencies: Vec<String>,
    /// Requirements the invoking prompt engine must satisfy. Defaults to
    /// empty.
    pub prompt_engine_requirements: OpenMetadata,
    /// Open, caller-defined metadata.
    pub metadata: OpenMetadata,
}

impl NewAgentInput {
    /// Builds a bare input for the given engine, leaving every defaultable
    /// field unset.
    #[must_use]
    pub fn new(engine: AgentEngine) -> Self {
        Self {
            id: None,
            engine,
            status: None,
            triggers: Vec::new(),
            knowledge_dependencies: Vec::new(),
            prompt_engine_requirements: OpenMetadata::new(),
            metadata: OpenMetadata::new(),
        }
    }
}

// ============================================================================
// SECTION: Payload Factory
// ============================================================================

/// Builds and validates an [`AgentPayload`] from partial input.
///
/// Unlike every other timestamped record, a missing `id` is not an error
/// here: it defaults to the empty string, matching §4.5's deliberate
/// tripwire for callers who invoke this factory before the backing actor
/// exists.
///
/// # Errors
///
/// Returns [`gitgov_core::GitGovError::DetailedValidation`] when the
/// resulting payload fails schema validation.
pub fn build_agent_payload(registry: &SchemaRegistry, input: NewAgentInput) -> GitGovResult<AgentPayload> {
    let payload = AgentPayload {
        id: input.id.unwrap_or_else(|| AgentId::new(String::new())),
        engine: input.engine,
        status: input.status.unwrap_or(ActorStatus::Active),
        triggers: input.triggers,
        knowledge_dependencies: input.knowledge_dependencies,
        prompt_engine_requirements: input.prompt_engine_requirements,
        metadata: input.metadata,
    };
    validate_payload(registry, &payload)?;
    Ok(payload)
}

// ============================================================================
// SECTION: Envelope Factory
// ============================================================================

/// Builds a validated [`AgentPayload`] and signs it into an [`AgentRecord`]
/// envelope with exactly one signature.
///
/// # Errors
///
/// See [`build_agent_payload`]; also propagates signing failures from
/// [`crate::envelope::sign_new_envelope`].
pub fn build_agent_envelope(
    registry: &SchemaRegistry,
    input: NewAgentInput,
    keypair: &Keypair,
    key_id: &str,
    role: &str,
    notes: &str,
) -> GitGovResult<AgentRecord> {
    let payload = build_agent_payload(registry, input)?;
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
    use gitgov_core::AgentEngine;
    use gitgov_core::OpenMetadata;
    use gitgov_schema::SchemaRegistry;

    use super::NewAgentInput;
    use super::build_agent_payload;

    #[test]
    fn id_defaults_to_empty_string() {
        let registry = SchemaRegistry::new();
        let input = NewAgentInput::new(AgentEngine::Local {
            config: OpenMetadata::new(),
        });
        let payload = build_agent_payload(&registry, input).unwrap();
        assert_eq!(payload.id.as_str(), "");
    }

    #[test]
    fn explicit_id_is_kept() {
        let registry = SchemaRegistry::new();
        let mut input = NewAgentInput::new(AgentEngine::Mcp {
            config: OpenMetadata::new(),
        });
        input.id = Some("agent:reviewer".into());
        let payload = build_agent_payload(&registry, input).unwrap();
        assert_eq!(payload.id.as_str(), "agent:reviewer");
    }
}
