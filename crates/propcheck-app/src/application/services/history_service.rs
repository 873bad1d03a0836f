use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::application::dtos::SessionSummaryDto;
use propcheck_domain::session::{Session, SessionStore};
use propcheck_domain::shared::{DomainError, SessionId};

/// Saved sessions, as shown in the history panel
pub struct HistoryService {
    store: Arc<SessionStore>,
}

impl HistoryService {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Newest first
    pub async fn list(&self) -> Vec<SessionSummaryDto> {
        self.store
            .list()
            .await
            .iter()
            .map(SessionSummaryDto::from)
            .collect()
    }

    pub async fn get(&self, id: &SessionId) -> Result<Session, DomainError> {
        self.store
            .find(id)
            .await
            .ok_or_else(|| DomainError::SessionNotFound(format!("Session {} not found", id)))
    }

    pub async fn delete(&self, id: &SessionId) -> Result<bool, DomainError> {
        self.store.delete(id).await
    }

    pub async fn clear(&self) -> Result<(), DomainError> {
        self.store.clear().await
    }

    /// Write the whole history to `path`; returns how many sessions
    pub async fn export_to_file(&self, path: &Path) -> Result<usize, DomainError> {
        let payload = self.store.export_json().await?;
        let count = self.store.list().await.len();

        tokio::fs::write(path, payload).await.map_err(|e| {
            DomainError::Infrastructure(format!("Failed to write {}: {}", path.display(), e))
        })?;

        info!(path = %path.display(), count, "History exported");
        Ok(count)
    }

    /// Merge an exported history; returns how many sessions were added
    pub async fn import_from_file(&self, path: &Path) -> Result<usize, DomainError> {
        let payload = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::Infrastructure(format!("Failed to read {}: {}", path.display(), e))
        })?;

        self.store.import_json(&payload).await
    }
}
