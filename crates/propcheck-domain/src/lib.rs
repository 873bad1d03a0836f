// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod challenge;
pub mod entry;
pub mod evaluation;
pub mod insights;
pub mod session;
pub mod shared;

// Re-exports for convenience
pub use challenge::ChallengeConfig;
pub use entry::{DailyEntry, EntryList};
pub use evaluation::{CalculationResult, ConsistencyEvaluator, EquityPoint};
pub use session::{Session, SessionStore, SlotStorage};
pub use shared::{DomainError, EntryId, SessionId};
