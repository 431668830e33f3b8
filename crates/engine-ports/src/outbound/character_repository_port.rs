//! Character persistence operations.

use anyhow::Result;
use async_trait::async_trait;
use chorequest_domain::{Character, CharacterId, PartyId, UserId};

/// Character persistence operations.
///
/// # Used By
/// - `CharacterServiceImpl` - creation, leveling, stat allocation
/// - `RewardServiceImpl` - resolving the acting character and persisting
///   reward mutations
/// - `DistributionServiceImpl` - loading the party roster
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CharacterRepositoryPort: Send + Sync {
    /// Create a new character
    async fn create(&self, character: &Character) -> Result<()>;

    /// Get a character by ID
    async fn get(&self, id: CharacterId) -> Result<Option<Character>>;

    /// Get the character belonging to a user
    async fn get_by_user(&self, user_id: UserId) -> Result<Option<Character>>;

    /// List all characters in a party, in join order
    async fn list(&self, party_id: PartyId) -> Result<Vec<Character>>;

    /// Persist a mutated character
    async fn update(&self, character: &Character) -> Result<()>;
}
