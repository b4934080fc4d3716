// gitgov-store/src/lib.rs
// ============================================================================
// Module: GitGovernance Store Library
// Description: A generic `Store<T>` interface with filesystem and in-memory
//              backends.
// Purpose: Give the backlog engine one key/value abstraction over record
//          persistence, independent of where records actually live.
// Dependencies: gitgov-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Every record type the engine persists goes through the same `Store<T>`
//! seam: `get`/`put`/`delete`/`list`/`exists`, keyed by the record's logical
//! id. The filesystem backend is the on-disk `.gitgov/<kind>/<id>.json`
//! layout; the in-memory backend exists for tests and for front-ends that do
//! not want a filesystem at all.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod fs;
pub mod id_safety;
pub mod memory;
pub mod serializer;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use fs::FilesystemStore;
pub use id_safety::validate_id;
pub use memory::InMemoryStore;
pub use serializer::PrettyJsonSerializer;
pub use serializer::RecordSerializer;

// ============================================================================
// SECTION: Store Trait
// ============================================================================

/// A generic key/value interface over persisted records of type `T`, keyed
/// by a caller-chosen logical id.
pub trait Store<T> {
    /// Returns the stored value for `id`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`gitgov_core::GitGovError::InvalidId`] when `id` fails
    /// path-safety checks, or a backend-specific I/O or parse error.
    fn get(&self, id: &str) -> gitgov_core::GitGovResult<Option<T>>;

    /// Stores `value` under `id`, overwriting any prior value.
    ///
    /// # Errors
    ///
    /// Returns [`gitgov_core::GitGovError::InvalidId`] when `id` fails
    /// path-safety checks, or a backend-specific I/O error.
    fn put(&self, id: &str, value: &T) -> gitgov_core::GitGovResult<()>;

    /// Removes the value stored under `id`. A no-op when `id` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`gitgov_core::GitGovError::InvalidId`] when `id` fails
    /// path-safety checks, or a backend-specific I/O error.
    fn delete(&self, id: &str) -> gitgov_core::GitGovResult<()>;

    /// Returns every id currently present, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns a backend-specific I/O error.
    fn list(&self) -> gitgov_core::GitGovResult<Vec<String>>;

    /// Returns whether `id` is currently present.
    ///
    /// # Errors
    ///
    /// Returns [`gitgov_core::GitGovError::InvalidId`] when `id` fails
    /// path-safety checks, or a backend-specific I/O error.
    fn exists(&self, id: &str) -> gitgov_core::GitGovResult<bool>;
}
