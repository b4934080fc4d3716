// gitgov-schema/src/lib.rs
// ============================================================================
// Module: GitGovernance Schema Library
// Description: JSON Schema documents, a compiled-validator registry, and the
//              three-layer validation pipeline for GitGovernance records.
// Purpose: Give every higher-level crate (factories, engine, store) one
//          place to validate a record without re-deriving its own schema.
// Dependencies: gitgov-core, jsonschema, serde_json
// ============================================================================

//! ## Overview
//! `gitgov-schema` owns no record semantics of its own — it mirrors the
//! payload shapes defined in `gitgov-core::record` as JSON Schema (Draft-07)
//! documents, compiles and caches validators for them, and implements the
//! full envelope validation pipeline (schema, checksum, signatures) that
//! every other crate delegates to rather than reimplementing.

pub mod registry;
pub mod schemas;
pub mod validate;

pub use registry::CacheStats;
pub use registry::RegistryError;
pub use registry::SchemaRegistry;
pub use schemas::ALL_RECORD_TYPES;
pub use schemas::envelope_schema_for;
pub use schemas::payload_schema_for;
pub use validate::DetailedValidationResult;
pub use validate::validate_full_embedded_metadata_record;
pub use validate::validate_payload_schema;
pub use validate::validate_schema;
