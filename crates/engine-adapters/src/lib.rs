//! ChoreQuest engine adapters
//!
//! Production implementations of the outbound ports: thread-local RNG,
//! system clock, and in-memory repositories used by integration tests and
//! as reference implementations for real stores.

pub mod infrastructure;

pub use infrastructure::{
    InMemoryAchievementRepository, InMemoryCharacterRepository, InMemoryCombatLog,
    InMemoryItemCatalog, InMemoryRewardLog, InMemoryTaskRepository, StaticPartyStats,
    SystemClock, ThreadRngAdapter,
};
