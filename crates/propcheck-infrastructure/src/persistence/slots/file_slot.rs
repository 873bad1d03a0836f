use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

use crate::persistence::ResultExt;
use propcheck_domain::session::SlotStorage;
use propcheck_domain::shared::DomainError;

/// One `<key>.json` file per slot inside a directory
///
/// Writes go to a temporary file first and are renamed into place, so
/// a reader never sees a half-written value.
pub struct JsonFileSlotStorage {
    dir: PathBuf,
}

impl JsonFileSlotStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, DomainError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(DomainError::Persistence(format!(
                "Invalid slot key: '{}'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl SlotStorage for JsonFileSlotStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, DomainError> {
        let path = self.slot_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).to_persistence_err("Read slot file"),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let path = self.slot_path(key)?;
        let tmp_path = path.with_extension("json.tmp");

        tokio::fs::create_dir_all(&self.dir)
            .await
            .to_persistence_err("Create slot directory")?;
        tokio::fs::write(&tmp_path, value)
            .await
            .to_persistence_err("Write slot file")?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .to_persistence_err("Replace slot file")?;

        debug!(key, path = %path.display(), bytes = value.len(), "Slot file written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let path = self.slot_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).to_persistence_err("Remove slot file"),
        }
    }
}
