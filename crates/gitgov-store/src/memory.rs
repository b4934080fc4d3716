// gitgov-store/src/memory.rs
// ============================================================================
// Module: In-Memory Store
// Description: A `Store<T>` backed by a mutex-guarded map, for tests and
//              front-ends that do not want a filesystem.
// Purpose: Mirror the filesystem store's contract without touching disk.
// Dependencies: gitgov-core, std::sync
// ============================================================================

//! ## Overview
//! Always deep-clones on `put` and `get`, so a caller mutating the value it
//! handed in (or got back) cannot observe or alter stored state. `Store<T>`
//! hands back owned values, so there is no way to offer a cheaper
//! shallow-sharing mode without changing that contract; a store that wants
//! to share storage with callers would need to speak in `Arc<T>` instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Mutex;

use gitgov_core::GitGovError;
use gitgov_core::GitGovResult;
use gitgov_core::ValidationFieldError;

use crate::Store;
use crate::id_safety::validate_id;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// A `Store<T>` backed by a mutex-guarded `BTreeMap`.
pub struct InMemoryStore<T> {
    /// The underlying map.
    values: Mutex<BTreeMap<String, T>>,
}

impl<T: Clone> InMemoryStore<T> {
    /// Builds an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Mutex::new(BTreeMap::new()),
        }
    }

    /// Removes every stored value.
    ///
    /// # Errors
    ///
    /// Returns [`GitGovError::DetailedValidation`] if the internal mutex was
    /// poisoned by a prior panic.
    pub fn clear(&self) -> GitGovResult<()> {
        self.lock()?.clear();
        Ok(())
    }

    /// Returns the number of stored values.
    ///
    /// # Errors
    ///
    /// Returns [`GitGovError::DetailedValidation`] if the internal mutex was
    /// poisoned by a prior panic.
    pub fn size(&self) -> GitGovResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Returns a point-in-time clone of every stored id/value pair.
    ///
    /// # Errors
    ///
    /// Returns [`GitGovError::DetailedValidation`] if the internal mutex was
    /// poisoned by a prior panic.
    pub fn snapshot(&self) -> GitGovResult<BTreeMap<String, T>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> GitGovResult<std::sync::MutexGuard<'_, BTreeMap<String, T>>> {
        self.values.lock().map_err(|_| GitGovError::DetailedValidation {
            record_type: "store".to_string(),
            errors: vec![ValidationFieldError::new("", "in-memory store mutex poisoned")],
        })
    }
}

impl<T: Clone> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Store<T> for InMemoryStore<T> {
    fn get(&self, id: &str) -> GitGovResult<Option<T>> {
        validate_id(id)?;
        Ok(self.lock()?.get(id).cloned())
    }

    fn put(&self, id: &str, value: &T) -> GitGovResult<()> {
        validate_id(id)?;
        self.lock()?.insert(id.to_string(), value.clone());
        Ok(())
    }

    fn delete(&self, id: &str) -> GitGovResult<()> {
        validate_id(id)?;
        self.lock()?.remove(id);
        Ok(())
    }

    fn list(&self) -> GitGovResult<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn exists(&self, id: &str) -> GitGovResult<bool> {
        validate_id(id)?;
        Ok(self.lock()?.contains_key(id))
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
    use super::InMemoryStore;
    use crate::Store;

    #[derive(Debug, Clone, PartialEq)]
    struct Sample {
        value: i32,
    }

    #[test]
    fn get_returns_none_for_absent_id() {
        let store: InMemoryStore<Sample> = InMemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn put_then_get_round_trips() {
        let store: InMemoryStore<Sample> = InMemoryStore::new();
        store.put("a", &Sample { value: 1 }).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(Sample { value: 1 }));
    }

    #[test]
    fn external_mutation_after_put_does_not_affect_stored_value() {
        let store: InMemoryStore<Sample> = InMemoryStore::new();
        let mut value = Sample { value: 1 };
        store.put("a", &value).unwrap();
        value.value = 99;
        assert_eq!(store.get("a").unwrap(), Some(Sample { value: 1 }));
    }

    #[test]
    fn delete_is_idempotent() {
        let store: InMemoryStore<Sample> = InMemoryStore::new();
        store.delete("never-existed").unwrap();
        store.put("a", &Sample { value: 1 }).unwrap();
        store.delete("a").unwrap();
        store.delete("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn list_returns_every_id() {
        let store: InMemoryStore<Sample> = InMemoryStore::new();
        store.put("a", &Sample { value: 1 }).unwrap();
        store.put("b", &Sample { value: 2 }).unwrap();
        let mut ids = store.list().unwrap();
        ids.sort();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn clear_size_and_snapshot_helpers() {
        let store: InMemoryStore<Sample> = InMemoryStore::new();
        assert_eq!(store.size().unwrap(), 0);
        store.put("a", &Sample { value: 1 }).unwrap();
        store.put("b", &Sample { value: 2 }).unwrap();
        assert_eq!(store.size().unwrap(), 2);
        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.len(), 2);
        store.clear().unwrap();
        assert_eq!(store.size().unwrap(), 0);
    }

    #[test]
    fn rejects_traversal_ids() {
        let store: InMemoryStore<Sample> = InMemoryStore::new();
        assert!(store.get("../escape").is_err());
        assert!(store.put("../escape", &Sample { value: 0 }).is_err());
        assert!(store.delete("../escape").is_err());
        assert!(store.exists("../escape").is_err());
    }
}
