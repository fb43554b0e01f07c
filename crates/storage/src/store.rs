use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use logic_core::model::UserProgress;

/// Fixed key for the single per-user progress record. There is no
/// multi-profile support; one record per store.
pub const STORAGE_KEY: &str = "logic-mastery-progress";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors surfaced by progress stores.
///
/// Callers are expected to treat these as a degraded-persistence signal, not
/// a fatal condition: the learning flow keeps working in memory.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("stored progress could not be decoded: {0}")]
    Serialization(String),
}

//
// ─── STORE CONTRACT ────────────────────────────────────────────────────────────
//

/// Key-value persistence contract for the progress record.
///
/// Synchronous by design: every operation is a single small read or write,
/// assumed atomic from the caller's point of view. Concurrent writers (for
/// example two app instances over the same file) are last-write-wins.
pub trait ProgressStore: Send + Sync {
    /// Load the stored record.
    ///
    /// `Ok(None)` means nothing has been stored yet, which is the defined
    /// initial state rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read or the
    /// stored document cannot be decoded.
    fn load(&self) -> Result<Option<UserProgress>, StorageError>;

    /// Persist the record, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    fn save(&self, progress: &UserProgress) -> Result<(), StorageError>;

    /// Remove the stored record entirely.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be modified.
    fn clear(&self) -> Result<(), StorageError>;
}

//
// ─── IN-MEMORY STORE ───────────────────────────────────────────────────────────
//

/// In-memory store for tests and prototyping.
#[derive(Clone, Default)]
pub struct MemoryStore {
    record: Arc<Mutex<Option<UserProgress>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<UserProgress>, StorageError> {
        let guard = self
            .record
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, progress: &UserProgress) -> Result<(), StorageError> {
        let mut guard = self
            .record
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        *guard = Some(progress.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .record
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

//
// ─── JSON FILE STORE ───────────────────────────────────────────────────────────
//

/// File-backed store: one JSON document named after [`STORAGE_KEY`] inside a
/// chosen directory, the local-storage analog for a desktop build.
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store the record at `<dir>/logic-mastery-progress.json`.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> Result<Option<UserProgress>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Unavailable(e.to_string())),
        };
        let progress = serde_json::from_str(&text)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(Some(progress))
    }

    fn save(&self, progress: &UserProgress) -> Result<(), StorageError> {
        let text = serde_json::to_string(progress)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.path, text).map_err(|e| StorageError::Unavailable(e.to_string()))
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Unavailable(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logic_core::time::fixed_now;

    fn sample_progress() -> UserProgress {
        let mut progress = UserProgress::default();
        let module = progress.module_mut("propositional");
        module.lesson_completed = true;
        module.record_attempt("prop-1", true, fixed_now());
        progress.touch("propositional", fixed_now());
        progress
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let progress = sample_progress();
        store.save(&progress).unwrap();
        assert_eq!(store.load().unwrap(), Some(progress));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn memory_store_clones_share_the_record() {
        let store = MemoryStore::new();
        let alias = store.clone();
        store.save(&sample_progress()).unwrap();
        assert!(alias.load().unwrap().is_some());
    }

    #[test]
    fn file_store_missing_file_is_the_default_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load().unwrap().is_none());
        // Clearing an empty store is also fine.
        store.clear().unwrap();
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let progress = sample_progress();
        store.save(&progress).unwrap();
        assert_eq!(store.load().unwrap(), Some(progress));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_uses_the_fixed_storage_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save(&UserProgress::default()).unwrap();
        assert!(dir.path().join("logic-mastery-progress.json").exists());
    }

    #[test]
    fn file_store_corrupt_document_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(store.path(), "{not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
