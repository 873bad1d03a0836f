#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::super::*;
    use crate::challenge::ChallengeConfig;
    use crate::entry::{DailyEntry, EntryList};
    use crate::evaluation::{CalculationResult, ConsistencyEvaluator};
    use crate::shared::{DomainError, SessionId};

    // Fake slot storage for testing

    struct FakeSlotStorage {
        slots: tokio::sync::RwLock<HashMap<String, String>>,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
    }

    impl FakeSlotStorage {
        fn new() -> Self {
            Self {
                slots: tokio::sync::RwLock::new(HashMap::new()),
                fail_reads: AtomicBool::new(false),
                fail_writes: AtomicBool::new(false),
            }
        }

        async fn raw(&self) -> Option<String> {
            self.slots.read().await.get(SESSIONS_SLOT).cloned()
        }

        async fn put_raw(&self, value: &str) {
            self.slots
                .write()
                .await
                .insert(SESSIONS_SLOT.to_string(), value.to_string());
        }
    }

    #[async_trait::async_trait]
    impl SlotStorage for FakeSlotStorage {
        async fn read(&self, key: &str) -> Result<Option<String>, DomainError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(DomainError::Persistence("disk I/O error".to_string()));
            }
            Ok(self.slots.read().await.get(key).cloned())
        }

        async fn write(&self, key: &str, value: &str) -> Result<(), DomainError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(DomainError::Persistence("quota exceeded".to_string()));
            }
            self.slots
                .write()
                .await
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), DomainError> {
            self.slots.write().await.remove(key);
            Ok(())
        }
    }

    fn setup() -> (Arc<FakeSlotStorage>, SessionStore) {
        let storage = Arc::new(FakeSlotStorage::new());
        let store = SessionStore::new(storage.clone());
        (storage, store)
    }

    fn sample(profit: f64) -> (ChallengeConfig, Vec<DailyEntry>, CalculationResult) {
        let config = ChallengeConfig::default();
        let mut list = EntryList::new();
        let id = list.entries()[0].id.clone();
        list.update(&id, Some(profit)).unwrap();
        list.append();
        let result = ConsistencyEvaluator::evaluate(&config, list.entries()).unwrap();
        (config, list.into_entries(), result)
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let (_, store) = setup();
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_round_trip() {
        let (_, store) = setup();
        let (config, entries, result) = sample(1800.0);

        let saved = store.save(&config, &entries, &result).await.unwrap();
        let listed = store.list().await;

        assert_eq!(listed.len(), 1);
        let loaded = &listed[0];
        assert_eq!(loaded, &saved);
        assert_eq!(loaded.config(), &config);
        assert_eq!(loaded.daily_entries(), entries.as_slice());
        assert_eq!(loaded.results(), Some(&result));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (_, store) = setup();
        let mut ids = Vec::new();
        for profit in [100.0, 200.0, 300.0] {
            let (config, entries, result) = sample(profit);
            ids.push(store.save(&config, &entries, &result).await.unwrap().id().clone());
        }

        let listed: Vec<SessionId> = store.list().await.iter().map(|s| s.id().clone()).collect();
        ids.reverse();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn test_retention_cap_drops_oldest() {
        let (_, store) = setup();
        let mut ids = Vec::new();
        for i in 0..(MAX_SESSIONS + 1) {
            let (config, entries, result) = sample(100.0 + i as f64);
            ids.push(store.save(&config, &entries, &result).await.unwrap().id().clone());
        }

        let listed = store.list().await;
        assert_eq!(listed.len(), MAX_SESSIONS);
        assert_eq!(listed[0].id(), &ids[MAX_SESSIONS]);
        assert_eq!(listed[MAX_SESSIONS - 1].id(), &ids[1]);
        assert!(listed.iter().all(|s| s.id() != &ids[0]));
    }

    #[tokio::test]
    async fn test_delete_removes_only_that_session() {
        let (_, store) = setup();
        let (config, entries, result) = sample(500.0);
        let first = store.save(&config, &entries, &result).await.unwrap();
        let second = store.save(&config, &entries, &result).await.unwrap();

        assert!(store.delete(first.id()).await.unwrap());

        let listed = store.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), second.id());
        assert!(store.find(first.id()).await.is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_leaves_collection_unchanged() {
        let (storage, store) = setup();
        let (config, entries, result) = sample(500.0);
        store.save(&config, &entries, &result).await.unwrap();
        let before = storage.raw().await;

        let deleted = store
            .delete(&SessionId::from_string("does-not-exist"))
            .await
            .unwrap();

        assert!(!deleted);
        assert_eq!(storage.raw().await, before);
    }

    #[tokio::test]
    async fn test_clear_empties_history() {
        let (storage, store) = setup();
        let (config, entries, result) = sample(500.0);
        store.save(&config, &entries, &result).await.unwrap();

        store.clear().await.unwrap();

        assert!(store.list().await.is_empty());
        assert!(storage.raw().await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_payload_reads_as_empty_but_is_not_overwritten() {
        let (storage, store) = setup();
        let (config, entries, result) = sample(900.0);

        for corrupt in ["{not json", r#"{"an": "object"}"#] {
            storage.put_raw(corrupt).await;
            assert!(store.list().await.is_empty());

            let outcome = store.save(&config, &entries, &result).await;
            assert!(matches!(outcome, Err(DomainError::Persistence(_))));
            assert_eq!(storage.raw().await.as_deref(), Some(corrupt));
        }

        // Clearing is the way out of a corrupt history
        store.clear().await.unwrap();
        store.save(&config, &entries, &result).await.unwrap();
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_read_failure_blocks_mutations_and_keeps_history() {
        let (storage, store) = setup();
        let mut ids = Vec::new();
        for i in 0..10 {
            let (config, entries, result) = sample(100.0 + i as f64);
            ids.push(store.save(&config, &entries, &result).await.unwrap().id().clone());
        }
        let before = storage.raw().await;

        storage.fail_reads.store(true, Ordering::SeqCst);
        let (config, entries, result) = sample(999.0);
        let saved = store.save(&config, &entries, &result).await;
        let deleted = store.delete(&ids[0]).await;
        let imported = store.import_json("[]").await;

        assert!(matches!(saved, Err(DomainError::Persistence(_))));
        assert!(matches!(deleted, Err(DomainError::Persistence(_))));
        assert!(matches!(imported, Err(DomainError::Persistence(_))));
        assert!(store.list().await.is_empty());
        assert_eq!(storage.raw().await, before);

        storage.fail_reads.store(false, Ordering::SeqCst);
        assert_eq!(store.list().await.len(), 10);
    }

    #[tokio::test]
    async fn test_malformed_records_are_skipped() {
        let (storage, store) = setup();
        storage
            .put_raw(
                r#"[
                    {"id": "broken", "accountSize": "lots"},
                    {
                        "id": "ok",
                        "accountSize": 100000,
                        "profitTargetPercentage": 6,
                        "consistencyRulePercentage": 35,
                        "dailyEntries": [{"id": "1", "day": 1, "profit": 10}],
                        "timestamp": "2024-01-01T00:00:00.000Z"
                    }
                ]"#,
            )
            .await;

        let listed = store.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id().as_str(), "ok");
    }

    #[tokio::test]
    async fn test_mutations_keep_undecodable_records() {
        let (storage, store) = setup();
        storage
            .put_raw(r#"[{"id": "legacy", "accountSize": 100000}]"#)
            .await;

        let (config, entries, result) = sample(400.0);
        let saved = store.save(&config, &entries, &result).await.unwrap();
        assert_eq!(store.list().await.len(), 1);

        assert!(store.delete(saved.id()).await.unwrap());

        let raw: Vec<serde_json::Value> =
            serde_json::from_str(&storage.raw().await.unwrap()).unwrap();
        assert_eq!(raw, vec![serde_json::json!({"id": "legacy", "accountSize": 100000})]);

        // The undecodable record can still be deleted by id
        assert!(store
            .delete(&SessionId::from_string("legacy"))
            .await
            .unwrap());
        assert_eq!(storage.raw().await.as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_write_failure_is_reported_and_history_kept() {
        let (storage, store) = setup();
        let (config, entries, result) = sample(700.0);
        store.save(&config, &entries, &result).await.unwrap();

        storage.fail_writes.store(true, Ordering::SeqCst);
        let outcome = store.save(&config, &entries, &result).await;

        assert!(matches!(outcome, Err(DomainError::Persistence(_))));
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_export_then_import_into_another_store() {
        let (_, source) = setup();
        for profit in [100.0, 200.0] {
            let (config, entries, result) = sample(profit);
            source.save(&config, &entries, &result).await.unwrap();
        }
        let exported = source.export_json().await.unwrap();

        let (_, target) = setup();
        let (config, entries, result) = sample(300.0);
        target.save(&config, &entries, &result).await.unwrap();

        assert_eq!(target.import_json(&exported).await.unwrap(), 2);
        assert_eq!(target.list().await.len(), 3);

        // Importing the same export again adds nothing
        assert_eq!(target.import_json(&exported).await.unwrap(), 0);
        assert_eq!(target.list().await.len(), 3);
    }

    #[tokio::test]
    async fn test_import_rejects_invalid_payload() {
        let (_, store) = setup();
        let result = store.import_json("not an export").await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }
}
