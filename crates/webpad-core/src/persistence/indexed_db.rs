use idb::{Database, Factory, ObjectStoreParams, TransactionMode, TransactionResult};
use serde::Serialize;
use tracing::{debug, warn};
use wasm_bindgen::JsValue;

use super::StorageBackend;
use crate::config::IdbConfig;
use crate::error::PersistenceError;
use crate::store::ProjectStore;

/// Project record kept in the browser's IndexedDB.
///
/// The database is opened per operation and closed again afterwards, so no
/// handle outlives a call and a concurrent [`reset`](StorageBackend::reset)
/// (which deletes the database) is never blocked by us.
#[derive(Clone, Debug, Default)]
pub struct IndexedDbStorage {
    config: IdbConfig,
}

impl IndexedDbStorage {
    pub fn new(config: IdbConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IdbConfig {
        &self.config
    }

    async fn open(&self) -> Result<Database, PersistenceError> {
        let factory = Factory::new().map_err(unavailable)?;
        let mut request = factory
            .open(&self.config.db_name, Some(self.config.version))
            .map_err(unavailable)?;

        let store_name = self.config.store_name.clone();
        request.on_upgrade_needed(move |event| {
            let database = match event.database() {
                Ok(database) => database,
                Err(err) => {
                    warn!("upgrade without database: {}", err);
                    return;
                }
            };
            if database.store_names().iter().any(|name| *name == store_name) {
                return;
            }
            if let Err(err) = database.create_object_store(&store_name, ObjectStoreParams::new()) {
                warn!("failed to create object store '{}': {}", store_name, err);
            }
        });

        request.await.map_err(unavailable)
    }

    fn key(&self) -> JsValue {
        JsValue::from_str(&self.config.record_key)
    }
}

impl StorageBackend for IndexedDbStorage {
    async fn save(&self, store: &ProjectStore) -> Result<(), PersistenceError> {
        let value = store
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|err| PersistenceError::Serialization(err.to_string()))?;

        let database = self.open().await?;
        let result = async {
            let transaction = database
                .transaction(&[self.config.store_name.as_str()], TransactionMode::ReadWrite)
                .map_err(backend)?;
            let object_store = transaction
                .object_store(&self.config.store_name)
                .map_err(backend)?;
            object_store
                .put(&value, Some(&self.key()))
                .map_err(backend)?
                .await
                .map_err(backend)?;
            let outcome = transaction.commit().map_err(backend)?.await.map_err(backend)?;
            committed(outcome)
        }
        .await;
        database.close();

        if result.is_ok() {
            debug!(entries = store.len(), "project record saved");
        }
        result
    }

    async fn load(&self) -> Result<Option<ProjectStore>, PersistenceError> {
        let database = self.open().await?;
        let result = async {
            let transaction = database
                .transaction(&[self.config.store_name.as_str()], TransactionMode::ReadOnly)
                .map_err(backend)?;
            let object_store = transaction
                .object_store(&self.config.store_name)
                .map_err(backend)?;
            object_store
                .get(self.key())
                .map_err(backend)?
                .await
                .map_err(backend)
        }
        .await;
        database.close();

        match result? {
            Some(value) if !value.is_undefined() && !value.is_null() => {
                let store: ProjectStore = serde_wasm_bindgen::from_value(value)
                    .map_err(|err| PersistenceError::Serialization(err.to_string()))?;
                debug!(entries = store.len(), "project record loaded");
                Ok(Some(store))
            }
            _ => Ok(None),
        }
    }

    async fn reset(&self) -> Result<(), PersistenceError> {
        let factory = Factory::new().map_err(unavailable)?;
        factory
            .delete(&self.config.db_name)
            .map_err(backend)?
            .await
            .map_err(backend)?;
        debug!(db = %self.config.db_name, "database deleted");
        Ok(())
    }
}

/// Only a committed transaction counts as a saved record.
fn committed(outcome: TransactionResult) -> Result<(), PersistenceError> {
    match outcome {
        TransactionResult::Committed => Ok(()),
        TransactionResult::Aborted => {
            Err(PersistenceError::Backend("transaction aborted".to_string()))
        }
    }
}

fn unavailable(err: idb::Error) -> PersistenceError {
    PersistenceError::Unavailable(err.to_string())
}

fn backend(err: idb::Error) -> PersistenceError {
    PersistenceError::Backend(err.to_string())
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::wasm_bindgen_test;

    use super::*;

    #[wasm_bindgen_test]
    fn test_aborted_transaction_is_a_failed_save() {
        assert!(committed(TransactionResult::Committed).is_ok());
        assert!(matches!(
            committed(TransactionResult::Aborted),
            Err(PersistenceError::Backend(_))
        ));
    }
}
