// gitgov-schema/src/registry.rs
// ============================================================================
// Module: Schema Registry
// Description: Owns the fixed set of record schemas and a memoized compiled
//              validator cache.
// Purpose: Avoid recompiling the same JSON Schema on every validation call.
// Dependencies: gitgov-core, jsonschema, std::sync
// ============================================================================

//! ## Overview
//! The registry pre-builds one envelope schema per record type at
//! construction time and compiles validators lazily on first use, caching
//! them by [`gitgov_core::RecordType`]. A second [`SchemaRegistry::compile`]
//! call for the same record type returns the identical compiled validator
//! (reference equality, checked via [`std::sync::Arc::ptr_eq`]), matching the
//! "compile once, reuse" contract every other GitGovernance caller expects.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use gitgov_core::RecordType;
use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use crate::schemas;
use crate::schemas::ALL_RECORD_TYPES;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by the schema registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A schema document failed to compile. This indicates a bug in one of
    /// the bundled schema builders, not a caller error.
    #[error("schema for {record_type} failed to compile: {reason}")]
    CompileFailed {
        /// The record type whose schema failed to compile.
        record_type: String,
        /// The underlying compiler error message.
        reason: String,
    },
    /// The registry's internal cache mutex was poisoned by a prior panic.
    #[error("schema registry cache mutex poisoned")]
    CachePoisoned,
}

// ============================================================================
// SECTION: Cache Stats
// ============================================================================

/// Introspection counters for the compiled-validator cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of validators actually compiled (cache misses).
    pub compiled: u64,
    /// Number of `compile()` calls served from the cache (cache hits).
    pub hits: u64,
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Owns the fixed schema set and the compiled-validator cache.
#[derive(Clone)]
pub struct SchemaRegistry {
    /// One envelope schema document per known record type, built eagerly.
    schemas: BTreeMap<RecordType, Arc<Value>>,
    /// One payload-only schema document per known record type, built eagerly.
    /// Factories validate a bare payload before it has a header to wrap it in.
    payload_schemas: BTreeMap<RecordType, Arc<Value>>,
    /// Compiled envelope validators, memoized by record type.
    cache: Arc<Mutex<BTreeMap<RecordType, Arc<Validator>>>>,
    /// Compiled payload-only validators, memoized by record type.
    payload_cache: Arc<Mutex<BTreeMap<RecordType, Arc<Validator>>>>,
    /// Cache hit/compile counters, shared across both caches.
    stats: Arc<Mutex<CacheStats>>,
}

impl SchemaRegistry {
    /// Builds a registry holding the envelope schema for every known record
    /// type. Schemas are built eagerly; validators are compiled lazily.
    #[must_use]
    pub fn new() -> Self {
        let schemas = ALL_RECORD_TYPES
            .into_iter()
            .map(|record_type| (record_type, Arc::new(schemas::envelope_schema_for(record_type))))
            .collect();
        let payload_schemas = ALL_RECORD_TYPES
            .into_iter()
            .map(|record_type| (record_type, Arc::new(schemas::payload_schema_for(record_type))))
            .collect();
        Self {
            schemas,
            payload_schemas,
            cache: Arc::new(Mutex::new(BTreeMap::new())),
            payload_cache: Arc::new(Mutex::new(BTreeMap::new())),
            stats: Arc::new(Mutex::new(CacheStats::default())),
        }
    }

    /// Returns the envelope schema document for `record_type`.
    #[must_use]
    pub fn schema(&self, record_type: RecordType) -> Arc<Value> {
        self.schemas
            .get(&record_type)
            .cloned()
            .unwrap_or_else(|| Arc::new(schemas::envelope_schema_for(record_type)))
    }

    /// Returns the payload-only schema document for `record_type`.
    #[must_use]
    pub fn payload_schema(&self, record_type: RecordType) -> Arc<Value> {
        self.payload_schemas
            .get(&record_type)
            .cloned()
            .unwrap_or_else(|| Arc::new(schemas::payload_schema_for(record_type)))
    }

    /// Compiles (or returns the cached compilation of) the envelope
    /// validator for `record_type`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CompileFailed`] when the bundled schema for
    /// `record_type` is not valid JSON Schema, or [`RegistryError::CachePoisoned`]
    /// if a prior panic poisoned the cache mutex.
    pub fn compile(&self, record_type: RecordType) -> Result<Arc<Validator>, RegistryError> {
        Self::compile_from(&self.cache, &self.schema(record_type), record_type, &self.stats)
    }

    /// Compiles (or returns the cached compilation of) the payload-only
    /// validator for `record_type`, used by factories to validate a bare
    /// payload before it has a header to wrap it in.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CompileFailed`] when the bundled schema for
    /// `record_type` is not valid JSON Schema, or [`RegistryError::CachePoisoned`]
    /// if a prior panic poisoned the cache mutex.
    pub fn compile_payload(&self, record_type: RecordType) -> Result<Arc<Validator>, RegistryError> {
        Self::compile_from(
            &self.payload_cache,
            &self.payload_schema(record_type),
            record_type,
            &self.stats,
        )
    }

    /// Shared compile-or-fetch-from-cache logic for both the envelope and
    /// payload-only caches.
    fn compile_from(
        cache: &Mutex<BTreeMap<RecordType, Arc<Validator>>>,
        schema: &Value,
        record_type: RecordType,
        stats: &Mutex<CacheStats>,
    ) -> Result<Arc<Validator>, RegistryError> {
        let mut cache = cache.lock().map_err(|_| RegistryError::CachePoisoned)?;
        if let Some(validator) = cache.get(&record_type) {
            stats.lock().map_err(|_| RegistryError::CachePoisoned)?.hits += 1;
            return Ok(Arc::clone(validator));
        }

        let validator = jsonschema::options()
            .with_draft(Draft::Draft7)
            .build(schema)
            .map_err(|err| RegistryError::CompileFailed {
                record_type: record_type.to_string(),
                reason: err.to_string(),
            })?;
        let validator = Arc::new(validator);
        cache.insert(record_type, Arc::clone(&validator));
        drop(cache);
        stats.lock().map_err(|_| RegistryError::CachePoisoned)?.compiled += 1;
        Ok(validator)
    }

    /// Drops every cached validator. Schema documents themselves are
    /// retained; only compiled artifacts are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CachePoisoned`] if a prior panic poisoned the
    /// cache mutex.
    pub fn clear_cache(&self) -> Result<(), RegistryError> {
        self.cache.lock().map_err(|_| RegistryError::CachePoisoned)?.clear();
        self.payload_cache.lock().map_err(|_| RegistryError::CachePoisoned)?.clear();
        Ok(())
    }

    /// Returns a snapshot of the current cache statistics.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CachePoisoned`] if a prior panic poisoned the
    /// stats mutex.
    pub fn stats(&self) -> Result<CacheStats, RegistryError> {
        Ok(*self.stats.lock().map_err(|_| RegistryError::CachePoisoned)?)
    }

}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    reason = "Test-only assertions are permitted."
)]
mod tests {
    use std::sync::Arc;

    use gitgov_core::RecordType;

    use super::SchemaRegistry;

    #[test]
    fn second_compile_call_returns_identical_validator() {
        let registry = SchemaRegistry::new();
        let first = registry.compile(RecordType::Task).unwrap();
        let second = registry.compile(RecordType::Task).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn stats_track_compiles_and_hits() {
        let registry = SchemaRegistry::new();
        registry.compile(RecordType::Task).unwrap();
        registry.compile(RecordType::Task).unwrap();
        registry.compile(RecordType::Actor).unwrap();
        let stats = registry.stats().unwrap();
        assert_eq!(stats.compiled, 2);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn clear_cache_forces_recompilation() {
        let registry = SchemaRegistry::new();
        let first = registry.compile(RecordType::Cycle).unwrap();
        registry.clear_cache().unwrap();
        let second = registry.compile(RecordType::Cycle).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn payload_cache_is_independent_of_envelope_cache() {
        let registry = SchemaRegistry::new();
        let envelope = registry.compile(RecordType::Task).unwrap();
        let payload = registry.compile_payload(RecordType::Task).unwrap();
        assert!(!Arc::ptr_eq(&envelope, &payload));
        let payload_again = registry.compile_payload(RecordType::Task).unwrap();
        assert!(Arc::ptr_eq(&payload, &payload_again));
    }

    #[test]
    fn every_record_type_compiles() {
        let registry = SchemaRegistry::new();
        for record_type in crate::schemas::ALL_RECORD_TYPES {
            registry.compile(record_type).unwrap();
        }
    }
}
