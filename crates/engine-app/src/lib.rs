//! ChoreQuest engine application layer
//!
//! Application services orchestrating the domain game systems over the
//! outbound ports: task distribution, reward distribution, task completion
//! with combat resolution, achievement checks, and character lifecycle.

pub mod application;

pub use application::services::{
    AchievementService, AchievementServiceImpl, CharacterService, CharacterServiceImpl,
    CreateCharacterRequest, DistributionService, DistributionServiceImpl, RewardError,
    RewardService, RewardServiceImpl, TaskError, TaskService, TaskServiceImpl,
};
