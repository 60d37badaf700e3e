//! VK wall client
//!
//! Crossposts a prepared item to the group wall. Photos go through the wall
//! upload server, videos through `video.save`; both end up as attachments on
//! a single `wall.post`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::entities::{MediaKind, MAX_VIDEO_BYTES};
use crate::domain::ports::{SyndicationItem, Syndicator};
use crate::error::SyndicationError;

const API_BASE: &str = "https://api.vk.com/method";
const API_VERSION: &str = "5.199";

/// VK caps wall post messages at this many characters
const MESSAGE_LIMIT: usize = 4095;

/// Syndicator posting to a VK group wall
pub struct VkWallClient {
    http: Client,
    token: String,
    group_id: String,
}

impl VkWallClient {
    pub fn new(token: String, group_id: String) -> Self {
        Self {
            http: Client::new(),
            token,
            group_id,
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T, SyndicationError> {
        let mut form: Vec<(&str, &str)> = params.to_vec();
        form.push(("access_token", &self.token));
        form.push(("v", API_VERSION));

        let envelope: VkEnvelope<T> = self
            .http
            .post(format!("{}/{}", API_BASE, method))
            .form(&form)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| SyndicationError::Deserialization(e.to_string()))?;

        if let Some(error) = envelope.error {
            return Err(SyndicationError::Api {
                code: error.error_code,
                message: error.error_msg,
            });
        }
        envelope
            .response
            .ok_or_else(|| SyndicationError::Deserialization("missing response".to_string()))
    }

    async fn upload_photo(&self, data: Vec<u8>) -> Result<String, SyndicationError> {
        let server: UploadServer = self
            .call("photos.getWallUploadServer", &[("group_id", &self.group_id)])
            .await?;

        let form = Form::new().part("photo", Part::bytes(data).file_name("photo.jpg"));
        let upload: PhotoUpload = self
            .http
            .post(server.upload_url)
            .multipart(form)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| SyndicationError::Deserialization(e.to_string()))?;

        let server_field = upload.server.to_string();
        let saved: Vec<SavedPhoto> = self
            .call(
                "photos.saveWallPhoto",
                &[
                    ("group_id", &self.group_id),
                    ("photo", &upload.photo),
                    ("server", &server_field),
                    ("hash", &upload.hash),
                ],
            )
            .await?;
        let photo = saved
            .into_iter()
            .next()
            .ok_or_else(|| SyndicationError::Deserialization("no saved photo".to_string()))?;
        Ok(format!("photo{}_{}", photo.owner_id, photo.id))
    }

    async fn upload_video(&self, name: &str, data: Vec<u8>) -> Result<String, SyndicationError> {
        let slot: VideoSlot = self
            .call(
                "video.save",
                &[("group_id", &self.group_id), ("name", name)],
            )
            .await?;

        let form = Form::new().part("video_file", Part::bytes(data).file_name("video.mp4"));
        self.http
            .post(slot.upload_url)
            .multipart(form)
            .send()
            .await?;

        Ok(format!("video{}_{}", slot.owner_id, slot.video_id))
    }
}

#[async_trait]
impl Syndicator for VkWallClient {
    async fn publish(&self, item: &SyndicationItem) -> Result<(), SyndicationError> {
        let mut attachments = Vec::new();

        if let Some(media) = &item.media {
            match media.kind {
                MediaKind::Photo => {
                    attachments.push(self.upload_photo(media.data.clone()).await?);
                }
                MediaKind::Video => {
                    if media.data.len() as u64 > MAX_VIDEO_BYTES {
                        return Err(SyndicationError::MediaTooLarge(media.data.len() as u64));
                    }
                    let name: String = item.caption.chars().take(50).collect();
                    attachments.push(self.upload_video(&name, media.data.clone()).await?);
                }
            }
        }

        let message: String = item.message().chars().take(MESSAGE_LIMIT).collect();
        let owner_id = format!("-{}", self.group_id);
        let attachments = attachments.join(",");

        let _: serde_json::Value = self
            .call(
                "wall.post",
                &[
                    ("owner_id", owner_id.as_str()),
                    ("from_group", "1"),
                    ("message", message.as_str()),
                    ("attachments", attachments.as_str()),
                ],
            )
            .await?;

        tracing::info!("crossposted to VK wall");
        Ok(())
    }
}

#[derive(Deserialize)]
struct VkEnvelope<T> {
    response: Option<T>,
    error: Option<VkError>,
}

#[derive(Deserialize)]
struct VkError {
    error_code: i64,
    error_msg: String,
}

#[derive(Deserialize)]
struct UploadServer {
    upload_url: String,
}

#[derive(Deserialize)]
struct PhotoUpload {
    server: i64,
    photo: String,
    hash: String,
}

#[derive(Deserialize)]
struct SavedPhoto {
    owner_id: i64,
    id: i64,
}

#[derive(Deserialize)]
struct VideoSlot {
    upload_url: String,
    owner_id: i64,
    video_id: i64,
}
