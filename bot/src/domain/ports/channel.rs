//! Channel source port trait

use async_trait::async_trait;

use crate::domain::entities::ChannelPost;
use crate::error::ChannelError;

/// Port trait for reading posts out of the news channel
#[async_trait]
pub trait ChannelSource: Send + Sync {
    /// Most recent channel posts, oldest first, capped at the source's limit
    async fn latest_posts(&self) -> Result<Vec<ChannelPost>, ChannelError>;

    /// Download the raw bytes of an attached media file
    async fn fetch_media(&self, file_id: &str) -> Result<Vec<u8>, ChannelError>;
}
