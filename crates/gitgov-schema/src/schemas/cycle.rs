// gitgov-schema/src/schemas/cycle.rs
// ============================================================================
// Module: Cycle Schema
// Description: JSON Schema for the `cycle` record payload.
// Purpose: Mirror `gitgov_core::CyclePayload` for schema-level validation.
// Dependencies: serde_json
// ============================================================================

use serde_json::Value;
use serde_json::json;

use super::common::string;
use super::common::string_array;
use super::common::string_enum;

/// Returns the JSON Schema for `CyclePayload`.
#[must_use]
pub fn payload_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "title", "status"],
        "properties": {
            "id": string("Cycle identifier, {unix-seconds}-cycle-{slug}."),
            "title": string("Short title."),
            "status": string_enum("Lifecycle status.", &["planning", "active", "completed", "archived"]),
            "taskIds": string_array("Tasks linked to this cycle."),
            "childCycleIds": string_array("Child cycles nested under this one."),
            "tags": string_array("Free-form tags.")
        },
        "additionalProperties": false
    })
}
