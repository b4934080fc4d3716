// gitgov-schema/src/schemas/changelog.rs
// ============================================================================
// Module: Changelog Schema
// Description: JSON Schema for the `changelog` record payload.
// Purpose: Mirror `gitgov_core::ChangelogPayload` for schema-level validation.
// Dependencies: serde_json
// ============================================================================

use serde_json::Value;
use serde_json::json;

use super::common::string;
use super::common::string_enum;

/// Returns the JSON Schema for `ChangelogPayload`.
#[must_use]
pub fn payload_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "entityType", "entityId", "changeType", "title", "description", "triggeredBy", "reason"],
        "properties": {
            "id": string("Changelog identifier, {unix-seconds}-changelog-{slug}."),
            "entityType": string_enum(
                "The kind of record this entry describes.",
                &["task", "cycle", "execution", "actor", "agent", "feedback"],
            ),
            "entityId": string("The id of the record this entry describes."),
            "changeType": string("Open string naming the kind of change."),
            "title": string("Short title."),
            "description": string("Full description of what changed."),
            "triggeredBy": string("The actor or agent that triggered the change."),
            "reason": string("Why the change happened.")
        },
        "additionalProperties": false
    })
}
