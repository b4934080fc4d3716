// gitgov-store/src/fs.rs
// ============================================================================
// Module: Filesystem Store
// Description: A `Store<T>` backed by one file per record under `basePath`.
// Purpose: Implement the `.gitgov/<kind>/<id>.json` on-disk layout with
//          path-safe ids and atomic writes.
// Dependencies: gitgov-core, serde, std::fs
// ============================================================================

//! ## Overview
//! Writes go through a create-temp-then-rename discipline so a reader never
//! observes a partially written file: the new content lands at
//! `<id><extension>.tmp` first, then `std::fs::rename` swaps it into place,
//! which is atomic on every filesystem this crate targets.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use gitgov_core::GitGovError;
use gitgov_core::GitGovResult;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Store;
use crate::id_safety::validate_id;
use crate::serializer::PrettyJsonSerializer;
use crate::serializer::RecordSerializer;

// ============================================================================
// SECTION: Filesystem Store
// ============================================================================

/// A `Store<T>` backed by one file per record under `base_path`.
pub struct FilesystemStore<T> {
    /// Root directory holding this store's files.
    base_path: PathBuf,
    /// File extension appended to every id, including the leading dot.
    extension: String,
    /// Stringify/parse pair used to serialize records.
    serializer: Arc<dyn RecordSerializer<T> + Send + Sync>,
}

impl<T> FilesystemStore<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    /// Builds a filesystem store rooted at `base_path`, using the default
    /// `.json` extension and pretty-JSON serialization.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self::with_serializer(base_path, ".json", PrettyJsonSerializer::new())
    }

    /// Builds a filesystem store with a custom extension and serializer.
    #[must_use]
    pub fn with_serializer(
        base_path: impl Into<PathBuf>,
        extension: impl Into<String>,
        serializer: impl RecordSerializer<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            extension: extension.into(),
            serializer: Arc::new(serializer),
        }
    }

    /// Returns the root directory this store reads and writes under.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the path a record with id `id` would be stored at. Does not
    /// check whether the file exists.
    #[must_use]
    fn path_for(&self, id: &str) -> PathBuf {
        self.base_path.join(format!("{id}{}", self.extension))
    }
}

impl<T> Store<T> for FilesystemStore<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    fn get(&self, id: &str) -> GitGovResult<Option<T>> {
        validate_id(id)?;
        let path = self.path_for(id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(io_error(&path, &err)),
        };
        self.serializer.parse(&content).map(Some)
    }

    fn put(&self, id: &str, value: &T) -> GitGovResult<()> {
        validate_id(id)?;
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path).map_err(|err| io_error(&self.base_path, &err))?;
        }
        let content = self.serializer.stringify(value)?;
        let path = self.path_for(id);
        let tmp_path = path.with_extension(format!("{}.tmp", self.extension.trim_start_matches('.')));
        fs::write(&tmp_path, content).map_err(|err| io_error(&tmp_path, &err))?;
        fs::rename(&tmp_path, &path).map_err(|err| io_error(&path, &err))
    }

    fn delete(&self, id: &str) -> GitGovResult<()> {
        validate_id(id)?;
        let path = self.path_for(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&path, &err)),
        }
    }

    fn list(&self) -> GitGovResult<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.base_path).map_err(|err| io_error(&self.base_path, &err))?;
        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| io_error(&self.base_path, &err))?;
            if !entry.file_type().map_err(|err| io_error(&self.base_path, &err))?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(stem) = name.strip_suffix(&self.extension) {
                ids.push(stem.to_string());
            }
        }
        Ok(ids)
    }

    fn exists(&self, id: &str) -> GitGovResult<bool> {
        validate_id(id)?;
        Ok(self.path_for(id).exists())
    }
}

/// Wraps a filesystem I/O failure as an educational [`GitGovError`]. There is
/// no dedicated I/O variant in the shared taxonomy, so filesystem failures
/// surface as a detailed-validation error scoped to the `"store"` record
/// type, matching how the serializer reports its own failures.
fn io_error(path: &Path, err: &io::Error) -> GitGovError {
    GitGovError::DetailedValidation {
        record_type: "store".to_string(),
        errors: vec![gitgov_core::ValidationFieldError::new(
            path.display().to_string(),
            err.to_string(),
        )],
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
    use serde::Deserialize;
    use serde::Serialize;
    use tempfile::tempdir;

    use super::FilesystemStore;
    use crate::Store;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        value: i32,
    }

    #[test]
    fn get_returns_none_for_absent_id() {
        let dir = tempdir().unwrap();
        let store: FilesystemStore<Sample> = FilesystemStore::new(dir.path());
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn put_then_get_round_trips() {
        let dir = tempdir().unwrap();
        let store: FilesystemStore<Sample> = FilesystemStore::new(dir.path());
        let value = Sample {
            name: "alice".to_string(),
            value: 1,
        };
        store.put("human:alice", &value).unwrap();
        assert_eq!(store.get("human:alice").unwrap(), Some(value));
    }

    #[test]
    fn put_creates_missing_base_path() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("actors");
        let store: FilesystemStore<Sample> = FilesystemStore::new(&nested);
        store
            .put(
                "human:bob",
                &Sample {
                    name: "bob".to_string(),
                    value: 2,
                },
            )
            .unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let store: FilesystemStore<Sample> = FilesystemStore::new(dir.path());
        store.delete("never-existed").unwrap();
        store
            .put(
                "human:carol",
                &Sample {
                    name: "carol".to_string(),
                    value: 3,
                },
            )
            .unwrap();
        store.delete("human:carol").unwrap();
        store.delete("human:carol").unwrap();
        assert_eq!(store.get("human:carol").unwrap(), None);
    }

    #[test]
    fn list_strips_extension_and_ignores_other_files() {
        let dir = tempdir().unwrap();
        let store: FilesystemStore<Sample> = FilesystemStore::new(dir.path());
        store
            .put(
                "a",
                &Sample {
                    name: "a".to_string(),
                    value: 1,
                },
            )
            .unwrap();
        store
            .put(
                "b",
                &Sample {
                    name: "b".to_string(),
                    value: 2,
                },
            )
            .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();

        let mut ids = store.list().unwrap();
        ids.sort();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn list_on_missing_base_path_is_empty() {
        let dir = tempdir().unwrap();
        let store: FilesystemStore<Sample> = FilesystemStore::new(dir.path().join("nonexistent"));
        assert_eq!(store.list().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn exists_reflects_put_and_delete() {
        let dir = tempdir().unwrap();
        let store: FilesystemStore<Sample> = FilesystemStore::new(dir.path());
        assert!(!store.exists("human:dana").unwrap());
        store
            .put(
                "human:dana",
                &Sample {
                    name: "dana".to_string(),
                    value: 4,
                },
            )
            .unwrap();
        assert!(store.exists("human:dana").unwrap());
        store.delete("human:dana").unwrap();
        assert!(!store.exists("human:dana").unwrap());
    }

    #[test]
    fn rejects_traversal_ids_on_every_operation() {
        let dir = tempdir().unwrap();
        let store: FilesystemStore<Sample> = FilesystemStore::new(dir.path());
        assert!(store.get("../escape").is_err());
        assert!(
            store
                .put(
                    "../escape",
                    &Sample {
                        name: "x".to_string(),
                        value: 0,
                    },
                )
                .is_err()
        );
        assert!(store.delete("../escape").is_err());
        assert!(store.exists("../escape").is_err());
    }

    #[test]
    fn put_overwrites_prior_value() {
        let dir = tempdir().unwrap();
        let store: FilesystemStore<Sample> = FilesystemStore::new(dir.path());
        store
            .put(
                "human:erin",
                &Sample {
                    name: "erin".to_string(),
                    value: 1,
                },
            )
            .unwrap();
        store
            .put(
                "human:erin",
                &Sample {
                    name: "erin".to_string(),
                    value: 2,
                },
            )
            .unwrap();
        assert_eq!(
            store.get("human:erin").unwrap(),
            Some(Sample {
                name: "erin".to_string(),
                value: 2
            })
        );
    }
}
