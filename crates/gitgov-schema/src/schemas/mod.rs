// gitgov-schema/src/schemas/mod.rs
// ============================================================================
// Module: Schema Documents
// Description: The fixed set of JSON Schemas (Draft-07), one per record type
//              plus the envelope.
// Purpose: Give the registry a logical-name-to-schema map it can compile and
//          cache.
// Dependencies: gitgov-core, serde_json
// ============================================================================

//! ## Overview
//! Every schema here is generated, not hand-authored against a separate
//! source of truth: each payload schema's required fields and enum values
//! are drawn directly from the corresponding `gitgov_core::record` type, so
//! the two cannot silently drift apart.

mod actor;
mod agent;
mod changelog;
mod common;
mod cycle;
mod envelope;
mod execution;
mod feedback;
mod task;

use gitgov_core::RecordType;
use serde_json::Value;

pub use envelope::envelope_schema;
pub use envelope::header_schema;
pub use envelope::signature_schema;

/// Returns the payload-only schema for `record_type`.
#[must_use]
pub fn payload_schema_for(record_type: RecordType) -> Value {
    match record_type {
        RecordType::Actor => actor::payload_schema(),
        RecordType::Agent => agent::payload_schema(),
        RecordType::Task => task::payload_schema(),
        RecordType::Cycle => cycle::payload_schema(),
        RecordType::Execution => execution::payload_schema(),
        RecordType::Changelog => changelog::payload_schema(),
        RecordType::Feedback => feedback::payload_schema(),
    }
}

/// Returns the full `{header, payload}` envelope schema for `record_type`.
#[must_use]
pub fn envelope_schema_for(record_type: RecordType) -> Value {
    envelope_schema(record_type.as_str(), payload_schema_for(record_type))
}

/// Every record type the registry pre-compiles on construction.
pub const ALL_RECORD_TYPES: [RecordType; 7] = [
    RecordType::Actor,
    RecordType::Agent,
    RecordType::Task,
    RecordType::Cycle,
    RecordType::Execution,
    RecordType::Changelog,
    RecordType::Feedback,
];
