// gitgov-schema/src/schemas/envelope.rs
// ============================================================================
// Module: Envelope Schema
// Description: JSON Schema for the `{header, payload}` envelope shared by
//              every record type.
// Purpose: Validate the header independently of whichever payload schema it
//          wraps.
// Dependencies: serde_json
// ============================================================================

use serde_json::Value;
use serde_json::json;

use super::common::string;
use super::common::string_enum;

/// Returns the JSON Schema for a signature entry in `header.signatures`.
#[must_use]
pub fn signature_schema() -> Value {
    json!({
        "type": "object",
        "required": ["keyId", "role", "notes", "signature", "timestamp"],
        "properties": {
            "keyId": string("Identifier of the signing actor."),
            "role": string("Capability role the signer claims to act under."),
            "notes": { "type": "string" },
            "signature": string("Base64-encoded Ed25519 signature bytes."),
            "timestamp": {
                "type": "integer",
                "description": "Unix-seconds timestamp the digest was signed over."
            }
        },
        "additionalProperties": false
    })
}

/// Returns the JSON Schema for the envelope `header`.
#[must_use]
pub fn header_schema(record_type: &str) -> Value {
    json!({
        "type": "object",
        "required": ["version", "type", "payloadChecksum", "signatures"],
        "properties": {
            "version": string("Envelope protocol version."),
            "type": string_enum("Record type discriminant.", &[record_type]),
            "payloadChecksum": {
                "type": "string",
                "pattern": "^[0-9a-f]{64}$",
                "description": "Lowercase hex SHA-256 of the canonical payload."
            },
            "signatures": {
                "type": "array",
                "items": signature_schema(),
                "minItems": 1
            },
            "schemaUrl": { "type": "string" },
            "schemaChecksum": { "type": "string" }
        },
        "additionalProperties": false
    })
}

/// Wraps a payload schema in the standard `{header, payload}` envelope
/// shape for `record_type`.
#[must_use]
pub fn envelope_schema(record_type: &str, payload_schema: Value) -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "$id": format!("gitgovernance://schema/{record_type}.envelope.json"),
        "title": format!("GitGovernance {record_type} envelope"),
        "type": "object",
        "required": ["header", "payload"],
        "properties": {
            "header": header_schema(record_type),
            "payload": payload_schema
        },
        "additionalProperties": false
    })
}
