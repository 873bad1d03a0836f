use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

use crate::persistence::ResultExt;
use propcheck_domain::session::SlotStorage;
use propcheck_domain::shared::DomainError;

/// Slots stored as rows of the `kv_slots` table
pub struct SqliteSlotStorage {
    pool: Arc<SqlitePool>,
}

impl SqliteSlotStorage {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotStorage for SqliteSlotStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, DomainError> {
        let query = "SELECT value FROM kv_slots WHERE key = ?1";

        let row: Option<(String,)> = sqlx::query_as(query)
            .bind(key)
            .fetch_optional(&*self.pool)
            .await
            .to_persistence_err("Read slot")?;

        Ok(row.map(|(value,)| value))
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO kv_slots (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
        "#;

        sqlx::query(query)
            .bind(key)
            .bind(value)
            .bind(Utc::now())
            .execute(&*self.pool)
            .await
            .to_persistence_err("Write slot")?;

        debug!(key, bytes = value.len(), "Slot written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let query = "DELETE FROM kv_slots WHERE key = ?1";

        sqlx::query(query)
            .bind(key)
            .execute(&*self.pool)
            .await
            .to_persistence_err("Remove slot")?;

        Ok(())
    }
}
