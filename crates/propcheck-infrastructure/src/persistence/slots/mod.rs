//! `SlotStorage` backends.

mod file_slot;
mod memory_slot;
mod sqlite_slot;

pub use file_slot::JsonFileSlotStorage;
pub use memory_slot::InMemorySlotStorage;
pub use sqlite_slot::SqliteSlotStorage;
