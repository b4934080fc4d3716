// gitgov-schema/src/schemas/feedback.rs
// ============================================================================
// Module: Feedback Schema
// Description: JSON Schema for the `feedback` record payload.
// Purpose: Mirror `gitgov_core::FeedbackPayload` for schema-level validation.
// Dependencies: serde_json
// ============================================================================

use serde_json::Value;
use serde_json::json;

use super::common::string;
use super::common::string_enum;

/// Returns the JSON Schema for `FeedbackPayload`.
#[must_use]
pub fn payload_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "entityType", "entityId", "type", "status", "content"],
        "properties": {
            "id": string("Feedback identifier, {unix-seconds}-feedback-{slug}."),
            "entityType": string_enum(
                "The kind of record this feedback is about.",
                &["task", "cycle", "execution", "actor", "agent", "feedback"],
            ),
            "entityId": string("The id of the record this feedback is about."),
            "type": string_enum(
                "The kind of feedback.",
                &["blocking", "suggestion", "question", "clarification", "approval", "assignment"],
            ),
            "status": string_enum("Resolution status.", &["open", "acknowledged", "resolved", "wontfix"]),
            "content": string("The feedback content."),
            "assignee": string("The actor assigned, for assignment feedback."),
            "resolvesFeedbackId": string("The prior feedback record this one resolves.")
        },
        "additionalProperties": false
    })
}
