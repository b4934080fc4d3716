// gitgov-schema/src/schemas/agent.rs
// ============================================================================
// Module: Agent Schema
// Description: JSON Schema for the `agent` record payload.
// Purpose: Mirror `gitgov_core::AgentPayload` for schema-level validation.
// Dependencies: serde_json
// ============================================================================

use serde_json::Value;
use serde_json::json;

use super::common::open_object;
use super::common::string;
use super::common::string_array;
use super::common::string_enum;

/// Returns the JSON Schema for `AgentEngine`.
#[must_use]
fn engine_schema() -> Value {
    json!({
        "type": "object",
        "required": ["type"],
        "properties": {
            "type": string_enum("How this agent is invoked.", &["local", "api", "mcp", "custom"]),
            "config": open_object("Engine-specific configuration.")
        },
        "additionalProperties": false
    })
}

/// Returns the JSON Schema for `AgentTrigger`.
#[must_use]
fn trigger_schema() -> Value {
    json!({
        "type": "object",
        "required": ["kind"],
        "properties": {
            "kind": string("Trigger kind (task_status_changed, schedule, manual, ...)."),
            "config": open_object("Trigger-specific configuration.")
        },
        "additionalProperties": false
    })
}

/// Returns the JSON Schema for `AgentPayload`.
#[must_use]
pub fn payload_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "engine", "status"],
        "properties": {
            "id": string("Agent identifier; must match an actor record of kind agent."),
            "engine": engine_schema(),
            "status": string_enum("Lifecycle status.", &["active", "revoked"]),
            "triggers": {
                "type": "array",
                "items": trigger_schema()
            },
            "knowledge_dependencies": string_array("Identifiers of knowledge sources this agent depends on."),
            "prompt_engine_requirements": open_object("Requirements the invoking prompt engine must satisfy."),
            "metadata": open_object("Open, caller-defined metadata.")
        },
        "additionalProperties": false
    })
}
