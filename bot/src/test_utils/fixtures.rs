//! Test fixtures

use chrono::{DateTime, Utc};

use crate::domain::entities::{ChannelPost, MediaAttachment, MediaKind, NewsCard};
use crate::feed::site_tz;

/// Recent timestamp truncated to whole seconds, so rendered timestamps
/// round-trip exactly
fn recent() -> DateTime<Utc> {
    DateTime::from_timestamp(Utc::now().timestamp(), 0).expect("valid timestamp")
}

/// A plain text channel post
pub fn test_post(message_id: i64, text: &str) -> ChannelPost {
    ChannelPost {
        message_id,
        media_group_id: None,
        date: recent(),
        text: Some(text.to_string()),
        caption: None,
        media: None,
    }
}

/// A text post with an explicit unix timestamp
pub fn test_post_at(message_id: i64, text: &str, timestamp: i64) -> ChannelPost {
    let mut post = test_post(message_id, text);
    post.date = DateTime::from_timestamp(timestamp, 0).expect("valid timestamp");
    post
}

/// A photo post whose media file id is `photo-<message_id>`
pub fn test_photo_post(message_id: i64, caption: &str) -> ChannelPost {
    ChannelPost {
        message_id,
        media_group_id: None,
        date: recent(),
        text: None,
        caption: Some(caption.to_string()),
        media: Some(MediaAttachment {
            kind: MediaKind::Photo,
            file_id: format!("photo-{}", message_id),
            file_size: Some(1024),
        }),
    }
}

/// A minimal rendered-card model
pub fn test_card(post_id: i64, headline: &str) -> NewsCard {
    NewsCard {
        post_id,
        headline: headline.to_string(),
        category: None,
        urgent: false,
        caption: headline.to_string(),
        body: String::new(),
        media: None,
        published_at: recent().with_timezone(&site_tz()),
        telegram_url: format!("https://t.me/newsSVOih/{}", post_id),
        group_size: 1,
    }
}
