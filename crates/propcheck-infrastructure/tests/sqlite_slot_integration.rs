use std::sync::Arc;

use propcheck_domain::session::{SessionStore, SlotStorage, MAX_SESSIONS, SESSIONS_SLOT};
use propcheck_infrastructure::persistence::slots::SqliteSlotStorage;
use propcheck_infrastructure::persistence::Database;

mod test_helpers;

#[tokio::test]
async fn sqlite_slot_write_read_overwrite_remove() {
    let pool = test_helpers::setup_in_memory_db().await;
    let storage = SqliteSlotStorage::new(pool);

    assert_eq!(storage.read("traderSessions").await.expect("read"), None);

    storage.write("traderSessions", "[]").await.expect("write");
    storage
        .write("traderSessions", "[{\"id\":\"a\"}]")
        .await
        .expect("overwrite");

    let value = storage.read("traderSessions").await.expect("read");
    assert_eq!(value.as_deref(), Some("[{\"id\":\"a\"}]"));

    storage.remove("traderSessions").await.expect("remove");
    assert_eq!(storage.read("traderSessions").await.expect("read"), None);

    // Removing a missing slot is not an error
    storage.remove("traderSessions").await.expect("remove again");
}

#[tokio::test]
async fn session_store_on_sqlite_keeps_the_latest_fifty() {
    let pool = test_helpers::setup_in_memory_db().await;
    let store = SessionStore::new(Arc::new(SqliteSlotStorage::new(pool)));

    let mut ids = Vec::new();
    for day_profit in 0..=MAX_SESSIONS {
        let (config, entries, result) =
            test_helpers::evaluated(&[Some(1000.0 + day_profit as f64), None]);
        let session = store.save(&config, &entries, &result).await.expect("save");
        ids.push(session.id().clone());
    }

    let listed = store.list().await;
    assert_eq!(listed.len(), MAX_SESSIONS);
    assert_eq!(listed.first().map(|s| s.id()), ids.last());
    assert!(!listed.iter().any(|s| s.id() == &ids[0]));
}

#[tokio::test]
async fn session_history_survives_reopening_the_database() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("data").join("propcheck.db");

    let (config, entries, result) = test_helpers::evaluated(&[Some(2000.0), Some(4500.0)]);
    let saved_id = {
        let database = Database::open(&db_path).await.expect("open");
        database.run_migrations().await.expect("migrate");
        let store = SessionStore::new(Arc::new(SqliteSlotStorage::new(Arc::new(
            database.pool().clone(),
        ))));
        let session = store.save(&config, &entries, &result).await.expect("save");
        database.pool().close().await;
        session.id().clone()
    };

    let database = Database::open(&db_path).await.expect("reopen");
    database.run_migrations().await.expect("migrate again");
    let storage = Arc::new(SqliteSlotStorage::new(Arc::new(database.pool().clone())));
    let raw = storage.read(SESSIONS_SLOT).await.expect("read raw");
    assert!(raw.is_some());

    let store = SessionStore::new(storage);
    let loaded = store.find(&saved_id).await.expect("session persisted");
    assert_eq!(loaded.config(), &config);
    assert_eq!(loaded.daily_entries(), entries.as_slice());
    assert_eq!(loaded.results(), Some(&result));
}
