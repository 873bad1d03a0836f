use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::{Session, SlotStorage};
use crate::challenge::ChallengeConfig;
use crate::entry::DailyEntry;
use crate::evaluation::CalculationResult;
use crate::shared::{DomainError, SessionId};

/// Storage slot holding the serialized session history
pub const SESSIONS_SLOT: &str = "traderSessions";

/// Retention cap; older sessions are dropped first
pub const MAX_SESSIONS: usize = 50;

/// Append-only history of evaluations kept in a single storage slot
///
/// Every mutation reads the whole collection, changes it in memory and
/// writes the whole collection back. Mutations work on the raw records,
/// so a record this version cannot decode is carried along untouched.
/// A mutation never writes when the slot cannot be read or parsed; the
/// read-only views treat such a slot as an empty history.
pub struct SessionStore {
    storage: Arc<dyn SlotStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SlotStorage>) -> Self {
        Self { storage }
    }

    /// Record a new evaluation
    ///
    /// On a read or write failure the error is returned and the stored
    /// history is left as it was; the caller still owns `result`.
    pub async fn save(
        &self,
        config: &ChallengeConfig,
        entries: &[DailyEntry],
        result: &CalculationResult,
    ) -> Result<Session, DomainError> {
        let session = Session::new(*config, entries.to_vec(), Some(result.clone()));
        let record =
            serde_json::to_value(&session).map_err(|e| DomainError::Serialization(e.to_string()))?;

        let mut records = self.load_records().await?;
        records.push(record);
        retain_latest(&mut records);
        self.persist(&records).await?;

        info!(
            session_id = %session.id(),
            stored = records.len(),
            "Session saved to history"
        );

        Ok(session)
    }

    /// All readable sessions, newest first
    pub async fn list(&self) -> Vec<Session> {
        let mut sessions = self.load_all().await;
        sessions.reverse();
        sessions
    }

    pub async fn find(&self, id: &SessionId) -> Option<Session> {
        self.load_all()
            .await
            .into_iter()
            .find(|session| session.id() == id)
    }

    /// Remove one session; returns whether it existed
    pub async fn delete(&self, id: &SessionId) -> Result<bool, DomainError> {
        let mut records = self.load_records().await?;
        let before = records.len();
        records.retain(|record| record_id(record) != Some(id.as_str()));

        if records.len() == before {
            debug!(session_id = %id, "Session not in history, nothing to delete");
            return Ok(false);
        }

        self.persist(&records).await?;
        info!(session_id = %id, remaining = records.len(), "Session deleted");
        Ok(true)
    }

    pub async fn clear(&self) -> Result<(), DomainError> {
        self.storage.remove(SESSIONS_SLOT).await?;
        info!("Session history cleared");
        Ok(())
    }

    /// Serialized readable history in storage (oldest first) order
    pub async fn export_json(&self) -> Result<String, DomainError> {
        let sessions = self.load_all().await;
        serde_json::to_string_pretty(&sessions)
            .map_err(|e| DomainError::Serialization(e.to_string()))
    }

    /// Merge sessions from an exported history
    ///
    /// Records whose id is already stored are skipped; the merged
    /// collection is capped like any other save. Returns how many
    /// records were added.
    pub async fn import_json(&self, payload: &str) -> Result<usize, DomainError> {
        let incoming: Vec<Session> = serde_json::from_str(payload)
            .map_err(|e| DomainError::InvalidInput(format!("Invalid session export: {}", e)))?;

        let mut records = self.load_records().await?;
        let mut known: HashSet<String> = records
            .iter()
            .filter_map(|record| record_id(record).map(str::to_string))
            .collect();

        let mut added = 0;
        for session in incoming {
            if known.insert(session.id().as_str().to_string()) {
                records.push(
                    serde_json::to_value(&session)
                        .map_err(|e| DomainError::Serialization(e.to_string()))?,
                );
                added += 1;
            }
        }

        if added == 0 {
            return Ok(0);
        }

        retain_latest(&mut records);
        self.persist(&records).await?;
        info!(added, stored = records.len(), "Sessions imported");
        Ok(added)
    }

    /// Raw stored records; fails instead of guessing when the slot
    /// cannot be read or is not a JSON array
    async fn load_records(&self) -> Result<Vec<Value>, DomainError> {
        let raw = self.storage.read(SESSIONS_SLOT).await.map_err(|e| {
            DomainError::Persistence(format!("Failed to read session history: {}", e.message()))
        })?;

        match raw {
            Some(raw) => serde_json::from_str::<Vec<Value>>(&raw).map_err(|e| {
                DomainError::Persistence(format!("Session history is corrupt: {}", e))
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn load_all(&self) -> Vec<Session> {
        match self.load_records().await {
            Ok(records) => decode_sessions(records),
            Err(e) => {
                warn!(error = %e, "Session history unavailable, treating it as empty");
                Vec::new()
            }
        }
    }

    async fn persist(&self, records: &[Value]) -> Result<(), DomainError> {
        let payload =
            serde_json::to_string(records).map_err(|e| DomainError::Serialization(e.to_string()))?;

        self.storage
            .write(SESSIONS_SLOT, &payload)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to persist session history"))
    }
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn retain_latest(records: &mut Vec<Value>) {
    if records.len() > MAX_SESSIONS {
        let excess = records.len() - MAX_SESSIONS;
        records.drain(..excess);
        debug!(dropped = excess, "Oldest sessions dropped from history");
    }
}

fn decode_sessions(records: Vec<Value>) -> Vec<Session> {
    records
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, record)| match serde_json::from_value::<Session>(record) {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed session record");
                    None
                }
            },
        )
        .collect()
}
