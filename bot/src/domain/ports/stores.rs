//! Storage port traits
//!
//! The pipeline persists everything as flat files under the public directory;
//! these traits keep the services testable without touching the filesystem.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::MediaKind;
use crate::error::StoreError;

/// Port trait for the processed-id files
#[async_trait]
pub trait SeenStore: Send + Sync {
    async fn load(&self) -> Result<HashSet<String>, StoreError>;

    async fn save(&self, ids: &HashSet<String>) -> Result<(), StoreError>;
}

/// Port trait for the generated site pages
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Article blocks currently on the feed page, newest first
    async fn load_blocks(&self) -> Result<Vec<String>, StoreError>;

    async fn write_feed(&self, page: &str) -> Result<(), StoreError>;

    /// Append already-stripped blocks to the archive page
    async fn append_archive(&self, blocks: &[String]) -> Result<(), StoreError>;

    async fn write_sitemap(&self, xml: &str) -> Result<(), StoreError>;

    async fn write_rss(&self, xml: &str) -> Result<(), StoreError>;
}

/// Port trait for downloaded media files
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store media bytes and return the site-relative path
    async fn save(&self, kind: MediaKind, data: &[u8]) -> Result<String, StoreError>;

    /// Delete media files older than the cutoff; returns how many went away
    async fn remove_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError>;
}
