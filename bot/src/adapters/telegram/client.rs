//! Telegram Bot API client
//!
//! Reads channel posts through `getUpdates` and downloads attached media
//! through `getFile`. Only the fields the pipeline consumes are modeled.

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::entities::{ChannelPost, MediaAttachment, MediaKind};
use crate::domain::ports::ChannelSource;
use crate::error::ChannelError;

/// How many of the newest posts a sync pass considers
const POST_LIMIT: usize = 15;

const API_BASE: &str = "https://api.telegram.org";

/// Channel source backed by the Telegram Bot API
pub struct TelegramChannelClient {
    http: Client,
    token: String,
    /// Channel handle including the leading `@`
    channel: String,
}

impl TelegramChannelClient {
    pub fn new(token: String, channel: String) -> Self {
        Self {
            http: Client::new(),
            token,
            channel,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ChannelError> {
        let response = self
            .http
            .get(self.method_url(method))
            .query(query)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChannelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| ChannelError::Deserialization(e.to_string()))?;
        if !envelope.ok {
            return Err(ChannelError::Api {
                status: envelope.error_code.unwrap_or(status.as_u16()),
                message: envelope.description.unwrap_or_default(),
            });
        }
        envelope
            .result
            .ok_or_else(|| ChannelError::Deserialization("missing result".to_string()))
    }

    fn channel_username(&self) -> &str {
        self.channel.trim_start_matches('@')
    }
}

#[async_trait]
impl ChannelSource for TelegramChannelClient {
    async fn latest_posts(&self) -> Result<Vec<ChannelPost>, ChannelError> {
        let updates: Vec<Update> = self.call("getUpdates", &[]).await?;

        let posts: Vec<ChannelPost> = updates
            .into_iter()
            .filter_map(|u| u.channel_post)
            .filter(|m| m.chat.username.as_deref() == Some(self.channel_username()))
            .filter_map(into_post)
            .collect();

        // Keep only the newest posts, oldest first so album captions come
        // before their trailing text messages.
        let skip = posts.len().saturating_sub(POST_LIMIT);
        Ok(posts.into_iter().skip(skip).collect())
    }

    async fn fetch_media(&self, file_id: &str) -> Result<Vec<u8>, ChannelError> {
        let file: TelegramFile = self.call("getFile", &[("file_id", file_id)]).await?;
        let file_path = file
            .file_path
            .ok_or_else(|| ChannelError::Deserialization("file has no path".to_string()))?;

        let url = format!("{}/file/bot{}/{}", API_BASE, self.token, file_path);
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChannelError::Api {
                status: status.as_u16(),
                message: "media download failed".to_string(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

fn into_post(message: Message) -> Option<ChannelPost> {
    let date = DateTime::from_timestamp(message.date, 0)?;

    // Largest photo size comes last in the API's list.
    let media = if let Some(photo) = message.photo.and_then(|sizes| sizes.into_iter().last()) {
        Some(MediaAttachment {
            kind: MediaKind::Photo,
            file_id: photo.file_id,
            file_size: photo.file_size,
        })
    } else {
        message.video.map(|video| MediaAttachment {
            kind: MediaKind::Video,
            file_id: video.file_id,
            file_size: video.file_size,
        })
    };

    Some(ChannelPost {
        message_id: message.message_id,
        media_group_id: message.media_group_id,
        date,
        text: message.text,
        caption: message.caption,
        media,
    })
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<u16>,
}

#[derive(Deserialize)]
struct Update {
    channel_post: Option<Message>,
}

#[derive(Deserialize)]
struct Message {
    message_id: i64,
    date: i64,
    chat: Chat,
    text: Option<String>,
    caption: Option<String>,
    media_group_id: Option<String>,
    photo: Option<Vec<PhotoSize>>,
    video: Option<Video>,
}

#[derive(Deserialize)]
struct Chat {
    username: Option<String>,
}

#[derive(Deserialize)]
struct PhotoSize {
    file_id: String,
    file_size: Option<u64>,
}

#[derive(Deserialize)]
struct Video {
    file_id: String,
    file_size: Option<u64>,
}

#[derive(Deserialize)]
struct TelegramFile {
    file_path: Option<String>,
}
