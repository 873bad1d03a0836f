use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use propcheck_domain::session::SlotStorage;
use propcheck_domain::shared::DomainError;

/// Process-local slots, optionally limited to a byte quota
///
/// With a quota, a write that would push the summed size of all values
/// past it fails the way a full browser storage does.
#[derive(Default)]
pub struct InMemorySlotStorage {
    slots: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl InMemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }
}

#[async_trait]
impl SlotStorage for InMemorySlotStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut slots = self.slots.write().await;

        if let Some(quota) = self.quota_bytes {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            if others + value.len() > quota {
                return Err(DomainError::Persistence(format!(
                    "Storage quota of {} bytes exceeded",
                    quota
                )));
            }
        }

        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.slots.write().await.remove(key);
        Ok(())
    }
}
