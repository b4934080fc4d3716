// gitgov-schema/src/schemas/execution.rs
// ============================================================================
// Module: Execution Schema
// Description: JSON Schema for the `execution` record payload.
// Purpose: Mirror `gitgov_core::ExecutionPayload` for schema-level validation.
// Dependencies: serde_json, gitgov-core
// ============================================================================

use gitgov_core::ExecutionPayload;
use serde_json::Value;
use serde_json::json;

use super::common::string;
use super::common::string_min_len;

/// Returns the JSON Schema for `ExecutionPayload`.
#[must_use]
pub fn payload_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "taskId", "type", "title", "result"],
        "properties": {
            "id": string("Execution identifier, {unix-seconds}-execution-{slug}."),
            "taskId": string("The task this execution was performed against."),
            "type": string("Execution kind (progress, completion, ...)."),
            "title": string("Short title."),
            "result": string_min_len("The work performed or produced.", ExecutionPayload::RESULT_MIN_LEN)
        },
        "additionalProperties": false
    })
}
