//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod fs;
pub mod telegram;
pub mod vk;

pub use fs::{FileFeedStore, FileSeenStore, MediaDir};
pub use telegram::TelegramChannelClient;
pub use vk::VkWallClient;
