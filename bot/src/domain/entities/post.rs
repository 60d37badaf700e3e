//! Channel post model

use chrono::{DateTime, Utc};

/// Channel tag marking a post as urgent
pub const URGENT_TAG: &str = "#срочно";

/// Kind of media attached to a post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
}

/// Media attached to a channel post
#[derive(Debug, Clone)]
pub struct MediaAttachment {
    pub kind: MediaKind,
    pub file_id: String,
    pub file_size: Option<u64>,
}

/// A post pulled from the Telegram channel
#[derive(Debug, Clone)]
pub struct ChannelPost {
    pub message_id: i64,
    /// Posts of one album share a media group id
    pub media_group_id: Option<String>,
    pub date: DateTime<Utc>,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub media: Option<MediaAttachment>,
}

impl ChannelPost {
    /// Dedup key: the media group id when present, otherwise the message id
    pub fn group_key(&self) -> String {
        self.media_group_id
            .clone()
            .unwrap_or_else(|| self.message_id.to_string())
    }

    /// Caption and text concatenated, raw
    pub fn raw_text(&self) -> String {
        let caption = self.caption.as_deref().unwrap_or("");
        let text = self.text.as_deref().unwrap_or("");
        format!("{} {}", caption, text).trim().to_string()
    }

    pub fn is_urgent(&self) -> bool {
        self.raw_text().to_lowercase().contains(URGENT_TAG)
    }
}
