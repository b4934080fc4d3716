// gitgov-schema/src/schemas/common.rs
// ============================================================================
// Module: Shared Schema Fragments
// Description: Small JSON Schema builders reused across record schemas.
// Purpose: Avoid repeating the same `{"type": "string", ...}` boilerplate in
//          every per-type schema module.
// Dependencies: serde_json
// ============================================================================

use serde_json::Value;
use serde_json::json;

/// Returns a JSON Schema fragment for a plain string field.
#[must_use]
pub fn string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

/// Returns a JSON Schema fragment for a string field with a minimum length.
#[must_use]
pub fn string_min_len(description: &str, min_length: usize) -> Value {
    json!({
        "type": "string",
        "minLength": min_length,
        "description": description
    })
}

/// Returns a JSON Schema fragment for a string field bounded in length.
#[must_use]
pub fn string_bounded(description: &str, min_length: usize, max_length: usize) -> Value {
    json!({
        "type": "string",
        "minLength": min_length,
        "maxLength": max_length,
        "description": description
    })
}

/// Returns a JSON Schema fragment for an array of strings.
#[must_use]
pub fn string_array(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "string" },
        "description": description
    })
}

/// Returns a JSON Schema fragment for a closed set of lowercase string enum
/// values.
#[must_use]
pub fn string_enum(description: &str, values: &[&str]) -> Value {
    json!({
        "type": "string",
        "enum": values,
        "description": description
    })
}

/// Returns a permissive schema fragment accepting any open JSON object, used
/// for `OpenMetadata`-backed fields.
#[must_use]
pub fn open_object(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description
    })
}

