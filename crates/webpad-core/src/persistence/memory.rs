use std::cell::{Cell, RefCell};

use tracing::trace;

use super::StorageBackend;
use crate::error::PersistenceError;
use crate::store::ProjectStore;

/// Keeps the record as a JSON string in memory.
///
/// The record goes through the same JSON encoding the browser backend uses,
/// so a store that survives here survives there too. Failures can be
/// switched on to exercise the error paths of callers.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: RefCell<Option<String>>,
    failing: Cell<bool>,
    saves: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already-saved record.
    pub fn with_record(store: &ProjectStore) -> Result<Self, PersistenceError> {
        let storage = Self::new();
        storage.record.replace(Some(serde_json::to_string(store)?));
        Ok(storage)
    }

    /// Start with a raw record, e.g. one that does not decode.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.record.replace(Some(raw.into()));
        storage
    }

    /// Make every subsequent operation fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// The raw stored record, if any.
    pub fn raw(&self) -> Option<String> {
        self.record.borrow().clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    fn check(&self) -> Result<(), PersistenceError> {
        if self.failing.get() {
            return Err(PersistenceError::Backend("storage offline".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemoryStorage {
    async fn save(&self, store: &ProjectStore) -> Result<(), PersistenceError> {
        self.check()?;
        let json = serde_json::to_string(store)?;
        trace!(bytes = json.len(), "record saved");
        self.record.replace(Some(json));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    async fn load(&self) -> Result<Option<ProjectStore>, PersistenceError> {
        self.check()?;
        match self.record.borrow().as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    async fn reset(&self) -> Result<(), PersistenceError> {
        self.check()?;
        self.record.replace(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectStore {
        [("main.js", "let a = 1;"), ("docs/", ""), ("src/app.py", "x")]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn test_empty_storage_loads_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_folder_markers() {
        let storage = MemoryStorage::new();
        storage.save(&sample()).await.unwrap();

        let loaded = storage.load().await.unwrap().unwrap();
        assert_eq!(loaded, sample());
        assert_eq!(loaded.get("docs/"), Some(""));
        assert_eq!(storage.save_count(), 1);
    }

    #[tokio::test]
    async fn test_record_is_plain_json_object() {
        let storage = MemoryStorage::new();
        storage.save(&sample()).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&storage.raw().unwrap()).unwrap();
        assert_eq!(value["main.js"], "let a = 1;");
        assert_eq!(value["docs/"], "");
    }

    #[tokio::test]
    async fn test_reset_discards_record() {
        let storage = MemoryStorage::with_record(&sample()).unwrap();
        storage.reset().await.unwrap();
        assert_eq!(storage.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failing_storage() {
        let storage = MemoryStorage::with_record(&sample()).unwrap();
        storage.set_failing(true);
        assert!(matches!(
            storage.save(&ProjectStore::new()).await,
            Err(PersistenceError::Backend(_))
        ));
        assert!(storage.load().await.is_err());

        // The record from before the outage is untouched.
        storage.set_failing(false);
        assert_eq!(storage.load().await.unwrap(), Some(sample()));
    }

    #[tokio::test]
    async fn test_corrupt_record() {
        let storage = MemoryStorage::with_raw("{not json");
        assert!(matches!(
            storage.load().await,
            Err(PersistenceError::Serialization(_))
        ));
    }
}
