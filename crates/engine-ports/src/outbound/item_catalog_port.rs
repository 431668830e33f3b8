//! Persisted item catalog queries.

use anyhow::Result;
use async_trait::async_trait;
use chorequest_domain::{Item, Rarity};

/// Query interface over the persisted item catalog.
///
/// Combat drops are looked up here by rarity rather than procedurally
/// generated.
///
/// # Used By
/// - `RewardServiceImpl` - combat drop candidate lookup
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ItemCatalogPort: Send + Sync {
    /// Fetch up to `limit` catalog items of the given rarity
    async fn find_by_rarity(&self, rarity: Rarity, limit: usize) -> Result<Vec<Item>>;
}
