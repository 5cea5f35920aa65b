//! SQLite backend: documents survive reopening the database file.

use serene_core::{keys, MoodValue, Storage};
use serene_memory::{ActivityLog, MoodStore, SqliteStore};
use std::sync::Arc;

#[tokio::test]
async fn test_get_missing_key() {
    let store = SqliteStore::new(":memory:").await.expect("Failed to open store");
    assert!(store.get(keys::MOODS).await.unwrap().is_none());
}

#[tokio::test]
async fn test_set_overwrites() {
    let store = SqliteStore::new(":memory:").await.expect("Failed to open store");
    store.set("sleepData", "[7]".to_string()).await.unwrap();
    store.set("sleepData", "[7,8]".to_string()).await.unwrap();
    assert_eq!(
        store.get("sleepData").await.unwrap().as_deref(),
        Some("[7,8]")
    );
}

#[tokio::test]
async fn test_documents_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("serene.db");

    {
        let storage: Arc<dyn Storage> = Arc::new(SqliteStore::new(&path).await.unwrap());
        let moods = MoodStore::new(storage.clone());
        moods
            .record(MoodValue::new(4).unwrap(), 1_800_000_000_000)
            .await
            .unwrap();
        ActivityLog::new(storage).ensure_seeded().await.unwrap();
    }

    let storage: Arc<dyn Storage> = Arc::new(SqliteStore::new(&path).await.unwrap());
    let moods = MoodStore::new(storage.clone()).all().await;
    assert_eq!(moods.len(), 1);
    assert_eq!(moods[0].value.get(), 4);
    assert_eq!(ActivityLog::new(storage).list().await.len(), 3);
}
