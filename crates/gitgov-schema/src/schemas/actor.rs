// gitgov-schema/src/schemas/actor.rs
// ============================================================================
// Module: Actor Schema
// Description: JSON Schema for the `actor` record payload.
// Purpose: Mirror `gitgov_core::ActorPayload` for schema-level validation.
// Dependencies: serde_json
// ============================================================================

use serde_json::Value;
use serde_json::json;

use super::common::string;
use super::common::string_enum;

/// Returns the JSON Schema for `ActorPayload`.
#[must_use]
pub fn payload_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "type", "displayName", "publicKey", "roles", "status"],
        "properties": {
            "id": string("Actor identifier, {human|agent}:{slug}."),
            "type": string_enum("Whether this actor is human or agent.", &["human", "agent"]),
            "displayName": string("Human-readable display name."),
            "publicKey": {
                "type": "string",
                "pattern": "^[A-Za-z0-9+/]{42,44}={0,2}$",
                "description": "Raw 32-byte Ed25519 public key, base64-encoded."
            },
            "roles": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 1,
                "description": "Capability roles this actor may sign under."
            },
            "status": string_enum("Lifecycle status.", &["active", "revoked"]),
            "supersedesId": string("The actor id this record supersedes."),
            "supersededBy": string("The actor id that supersedes this one.")
        },
        "additionalProperties": false
    })
}
