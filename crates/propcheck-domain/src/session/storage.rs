use async_trait::async_trait;

use crate::shared::DomainError;

/// A named, durable text slot, the way browser local storage works
///
/// Writers always replace the whole value of a slot. Implementations
/// report every failure as `DomainError::Persistence`.
#[async_trait]
pub trait SlotStorage: Send + Sync {
    /// Current value of the slot, `None` if it was never written
    async fn read(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Replace the value of the slot
    async fn write(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Drop the slot entirely
    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}
