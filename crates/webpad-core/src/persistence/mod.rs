//! Persistence gateway.
//!
//! The whole [`ProjectStore`] is kept as a single record. A backend only has
//! to store, fetch and discard that record; everything else (when to save,
//! what to do on failure) is decided by [`Project`](crate::Project).
//!
//! Backends:
//! - [`MemoryStorage`] - in-process record, used by tests and non-browser hosts
//! - [`IndexedDbStorage`] - browser IndexedDB (wasm32 only)

mod memory;

#[cfg(target_arch = "wasm32")]
mod indexed_db;

pub use memory::MemoryStorage;

#[cfg(target_arch = "wasm32")]
pub use indexed_db::IndexedDbStorage;

use crate::error::PersistenceError;
use crate::store::ProjectStore;

/// Durable home for the project record.
///
/// Futures are not required to be `Send`: the browser backend holds JS
/// handles across await points and everything runs on one thread.
#[allow(async_fn_in_trait)]
pub trait StorageBackend {
    /// Overwrite the stored record with `store`.
    async fn save(&self, store: &ProjectStore) -> Result<(), PersistenceError>;

    /// Fetch the stored record. `Ok(None)` means nothing was ever saved.
    async fn load(&self) -> Result<Option<ProjectStore>, PersistenceError>;

    /// Discard the stored record entirely.
    async fn reset(&self) -> Result<(), PersistenceError>;
}
