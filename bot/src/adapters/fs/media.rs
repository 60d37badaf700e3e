//! Content-addressed media directory
//!
//! Downloaded photos and videos land under `media/photos` / `media/videos`
//! with a hash filename; anything older than the archive cutoff is deleted
//! together with its card.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::domain::entities::MediaKind;
use crate::domain::ports::MediaStore;
use crate::error::StoreError;

/// Media store rooted at the public directory
pub struct MediaDir {
    public_dir: PathBuf,
}

impl MediaDir {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    fn subdir(kind: MediaKind) -> &'static str {
        match kind {
            MediaKind::Photo => "photos",
            MediaKind::Video => "videos",
        }
    }

    fn extension(kind: MediaKind) -> &'static str {
        match kind {
            MediaKind::Photo => ".jpg",
            MediaKind::Video => ".mp4",
        }
    }
}

#[async_trait]
impl MediaStore for MediaDir {
    async fn save(&self, kind: MediaKind, data: &[u8]) -> Result<String, StoreError> {
        let subdir = Self::subdir(kind);
        let dir = self.public_dir.join("media").join(subdir);
        tokio::fs::create_dir_all(&dir).await?;

        let digest = hex::encode(Sha256::digest(data));
        let file_name = format!("{}{}", digest, Self::extension(kind));
        tokio::fs::write(dir.join(&file_name), data).await?;

        tracing::debug!(kind = ?kind, file = %file_name, bytes = data.len(), "media stored");
        Ok(format!("/media/{}/{}", subdir, file_name))
    }

    async fn remove_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut deleted = 0;
        for subdir in ["photos", "videos"] {
            let dir = self.public_dir.join("media").join(subdir);
            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            while let Some(entry) = entries.next_entry().await? {
                let meta = entry.metadata().await?;
                if !meta.is_file() {
                    continue;
                }
                let modified: DateTime<Utc> = match meta.modified() {
                    Ok(time) => time.into(),
                    Err(_) => continue,
                };
                if modified < cutoff {
                    tokio::fs::remove_file(entry.path()).await?;
                    deleted += 1;
                }
            }
        }
        if deleted > 0 {
            tracing::info!(deleted, "stale media removed");
        }
        Ok(deleted)
    }
}
