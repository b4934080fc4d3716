// gitgov-core/src/record/agent.rs
// ============================================================================
// Module: Agent Payload
// Description: Operational configuration for an agent actor.
// Purpose: Describe how an agent is invoked (local process, API, MCP, or a
//          custom integration) and what triggers activate it.
// Dependencies: crate::record::{actor, envelope, id, metadata}, serde
// ============================================================================

//! ## Overview
//! An agent record always references a pre-existing [`crate::record::actor::ActorPayload`]
//! of kind `agent` by id. The factory that constructs an agent payload does
//! *not* enforce this cross-record reference (referential integrity is an
//! engine-time concern, per the spec's ownership model); it only defaults
//! `id` to an empty string when none is supplied, which is a deliberate
//! tripwire rather than a convenience.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::record::actor::ActorStatus;
use crate::record::envelope::RecordPayload;
use crate::record::envelope::RecordType;
use crate::record::id::AgentId;
use crate::record::metadata::OpenMetadata;

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Tagged union describing how an agent is actually invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AgentEngine {
    /// Invoked as a local subprocess.
    Local {
        /// Engine-specific configuration (command, args, env, ...).
        #[serde(default)]
        config: OpenMetadata,
    },
    /// Invoked over an HTTP(S) API.
    Api {
        /// Engine-specific configuration (endpoint, auth, ...).
        #[serde(default)]
        config: OpenMetadata,
    },
    /// Invoked as an MCP tool.
    Mcp {
        /// Engine-specific configuration (server id, tool name, ...).
        #[serde(default)]
        config: OpenMetadata,
    },
    /// A custom integration not covered by the built-in engine kinds.
    Custom {
        /// Engine-specific configuration, entirely caller-defined.
        #[serde(default)]
        config: OpenMetadata,
    },
}

// ============================================================================
// SECTION: Trigger
// ============================================================================

/// A single condition under which an agent should be invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentTrigger {
    /// Trigger kind (`task_status_changed`, `schedule`, `manual`, ...).
    pub kind: String,
    /// Trigger-specific configuration.
    #[serde(default)]
    pub config: OpenMetadata,
}

// ============================================================================
// SECTION: Payload
// ============================================================================

/// The `agent` record payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPayload {
    /// Agent identifier; must match an [`crate::record::actor::ActorPayload`]
    /// of kind agent. Defaults to the empty string when not supplied by the
    /// caller — a valid agent record requires a pre-existing actor id, and
    /// this is enforced by upstream (engine) logic, not the factory.
    pub id: AgentId,
    /// How this agent is invoked.
    pub engine: AgentEngine,
    /// Lifecycle status.
    pub status: ActorStatus,
    /// Conditions that activate this agent.
    #[serde(default)]
    pub triggers: Vec<AgentTrigger>,
    /// Identifiers of knowledge sources this agent depends on.
    #[serde(rename = "knowledge_dependencies", default)]
    pub knowledge_dependencies: Vec<String>,
    /// Requirements the invoking prompt engine must satisfy.
    #[serde(rename = "prompt_engine_requirements", default)]
    pub prompt_engine_requirements: OpenMetadata,
    /// Open, caller-defined metadata.
    #[serde(default, skip_serializing_if = "OpenMetadata::is_empty")]
    pub metadata: OpenMetadata,
}

impl RecordPayload for AgentPayload {
    const RECORD_TYPE: RecordType = RecordType::Agent;

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
    use super::AgentEngine;
    use super::AgentPayload;
    use super::ActorStatus;
    use crate::record::metadata::OpenMetadata;

    #[test]
    fn engine_tag_serializes_as_lowercase_type() {
        let engine = AgentEngine::Mcp {
            config: OpenMetadata::new(),
        };
        let json = serde_json::to_value(engine).unwrap();
        assert_eq!(json["type"], "mcp");
    }

    #[test]
    fn agent_round_trips_through_json() {
        let payload = AgentPayload {
            id: "agent:reviewer".into(),
            engine: AgentEngine::Local {
                config: OpenMetadata::new(),
            },
            status: ActorStatus::Active,
            triggers: Vec::new(),
            knowledge_dependencies: Vec::new(),
            prompt_engine_requirements: OpenMetadata::new(),
            metadata: OpenMetadata::new(),
        };
        let json = serde_json::to_string(&payload).unwrap();
        let restored: AgentPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, payload);
    }
}
