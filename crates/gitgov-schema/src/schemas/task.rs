// gitgov-schema/src/schemas/task.rs
// ============================================================================
// Module: Task Schema
// Description: JSON Schema for the `task` record payload.
// Purpose: Mirror `gitgov_core::TaskPayload` for schema-level validation.
// Dependencies: serde_json, gitgov-core
// ============================================================================

use gitgov_core::TaskPayload;
use serde_json::Value;
use serde_json::json;

use super::common::open_object;
use super::common::string;
use super::common::string_array;
use super::common::string_bounded;
use super::common::string_enum;
use super::common::string_min_len;

/// Returns the JSON Schema for `TaskPayload`.
#[must_use]
pub fn payload_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "title", "description", "status", "priority"],
        "properties": {
            "id": string("Task identifier, {unix-seconds}-task-{slug}."),
            "title": string_bounded("Short title.", TaskPayload::TITLE_MIN_LEN, TaskPayload::TITLE_MAX_LEN),
            "description": string_min_len("Full description.", TaskPayload::DESCRIPTION_MIN_LEN),
            "status": string_enum(
                "Current lifecycle status.",
                &["draft", "review", "ready", "active", "done", "archived", "paused", "discarded"],
            ),
            "priority": string_enum("Priority.", &["low", "medium", "high", "critical"]),
            "tags": string_array("Free-form tags."),
            "cycleIds": string_array("Cycles this task is linked to."),
            "references": string_array("External references (URLs, ticket ids, ...)."),
            "notes": string_array("Free-text notes."),
            "metadata": open_object("Open, caller-defined metadata.")
        },
        "additionalProperties": false
    })
}
