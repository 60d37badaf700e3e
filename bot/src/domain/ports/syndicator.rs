//! Crossposting port trait

use async_trait::async_trait;

use crate::domain::entities::MediaKind;
use crate::error::SyndicationError;

/// Media to attach to a crosspost, already downloaded
#[derive(Debug, Clone)]
pub struct SyndicationMedia {
    pub kind: MediaKind,
    pub data: Vec<u8>,
}

/// One post prepared for the secondary platform
#[derive(Debug, Clone)]
pub struct SyndicationItem {
    pub caption: String,
    pub text: String,
    pub media: Option<SyndicationMedia>,
}

impl SyndicationItem {
    /// Message body for the wall post; falls back to a stub when empty
    pub fn message(&self) -> String {
        let combined = format!("{}\n\n{}", self.caption, self.text);
        let trimmed = combined.trim();
        if trimmed.is_empty() {
            "Новость".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Port trait for publishing to the secondary platform
#[async_trait]
pub trait Syndicator: Send + Sync {
    async fn publish(&self, item: &SyndicationItem) -> Result<(), SyndicationError>;
}
