//! IndexedDB backend, run in a browser with `wasm-pack test --headless`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use webpad_core::config::IdbConfig;
use webpad_core::{IndexedDbStorage, ProjectStore, StorageBackend};

wasm_bindgen_test_configure!(run_in_browser);

fn storage(db_name: &str) -> IndexedDbStorage {
    IndexedDbStorage::new(IdbConfig {
        db_name: db_name.to_string(),
        ..IdbConfig::default()
    })
}

#[wasm_bindgen_test]
async fn test_round_trip_and_reset() {
    let storage = storage("webpad_test_round_trip");
    storage.reset().await.unwrap();
    assert_eq!(storage.load().await.unwrap(), None);

    let project: ProjectStore = [("main.js", "1"), ("docs/", ""), ("src/a.py", "x")]
        .into_iter()
        .collect();
    storage.save(&project).await.unwrap();
    assert_eq!(storage.load().await.unwrap(), Some(project));

    storage.reset().await.unwrap();
    assert_eq!(storage.load().await.unwrap(), None);
}

#[wasm_bindgen_test]
async fn test_empty_store_is_not_missing() {
    let storage = storage("webpad_test_empty");
    storage.reset().await.unwrap();

    storage.save(&ProjectStore::new()).await.unwrap();
    assert_eq!(storage.load().await.unwrap(), Some(ProjectStore::new()));
}
