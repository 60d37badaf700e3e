//! Mock implementations of port traits
//!
//! In-memory, configurable through `with_*` builders, shareable across a
//! test through `Clone` (state lives behind an `Arc`).

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{ChannelPost, MediaKind};
use crate::domain::ports::{
    ChannelSource, FeedStore, MediaStore, SeenStore, SyndicationItem, Syndicator,
};
use crate::error::{ChannelError, StoreError, SyndicationError};

// ============================================================================
// In-Memory Channel Source
// ============================================================================

#[derive(Default, Clone)]
pub struct InMemoryChannelSource {
    posts: Arc<RwLock<Vec<ChannelPost>>>,
    media: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryChannelSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post(self, post: ChannelPost) -> Self {
        self.posts.write().unwrap().push(post);
        self
    }

    pub fn with_media(self, file_id: &str, data: Vec<u8>) -> Self {
        self.media.write().unwrap().insert(file_id.to_string(), data);
        self
    }
}

#[async_trait]
impl ChannelSource for InMemoryChannelSource {
    async fn latest_posts(&self) -> Result<Vec<ChannelPost>, ChannelError> {
        Ok(self.posts.read().unwrap().clone())
    }

    async fn fetch_media(&self, file_id: &str) -> Result<Vec<u8>, ChannelError> {
        self.media
            .read()
            .unwrap()
            .get(file_id)
            .cloned()
            .ok_or_else(|| ChannelError::Api {
                status: 404,
                message: format!("no such file: {}", file_id),
            })
    }
}

// ============================================================================
// In-Memory Seen Store
// ============================================================================

#[derive(Default, Clone)]
pub struct InMemorySeenStore {
    ids: Arc<RwLock<HashSet<String>>>,
    fail_saves: bool,
}

impl InMemorySeenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every save fails with a permission error
    pub fn failing_saves() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn with_seen(self, id: &str) -> Self {
        self.ids.write().unwrap().insert(id.to_string());
        self
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.ids.read().unwrap().contains(id)
    }
}

#[async_trait]
impl SeenStore for InMemorySeenStore {
    async fn load(&self) -> Result<HashSet<String>, StoreError> {
        Ok(self.ids.read().unwrap().clone())
    }

    async fn save(&self, ids: &HashSet<String>) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::Io(std::io::Error::from(
                std::io::ErrorKind::PermissionDenied,
            )));
        }
        *self.ids.write().unwrap() = ids.clone();
        Ok(())
    }
}

// ============================================================================
// In-Memory Feed Store
// ============================================================================

#[derive(Default)]
struct FeedState {
    blocks: Vec<String>,
    page: Option<String>,
    archive: Vec<String>,
    sitemap: Option<String>,
    rss: Option<String>,
}

#[derive(Default, Clone)]
pub struct InMemoryFeedStore {
    state: Arc<RwLock<FeedState>>,
}

impl InMemoryFeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the page with an existing article block
    pub fn with_block(self, block: &str) -> Self {
        self.state.write().unwrap().blocks.push(block.to_string());
        self
    }

    pub fn page(&self) -> Option<String> {
        self.state.read().unwrap().page.clone()
    }

    pub fn archived(&self) -> Vec<String> {
        self.state.read().unwrap().archive.clone()
    }

    pub fn sitemap(&self) -> Option<String> {
        self.state.read().unwrap().sitemap.clone()
    }

    pub fn rss(&self) -> Option<String> {
        self.state.read().unwrap().rss.clone()
    }
}

#[async_trait]
impl FeedStore for InMemoryFeedStore {
    async fn load_blocks(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.state.read().unwrap().blocks.clone())
    }

    async fn write_feed(&self, page: &str) -> Result<(), StoreError> {
        self.state.write().unwrap().page = Some(page.to_string());
        Ok(())
    }

    async fn append_archive(&self, blocks: &[String]) -> Result<(), StoreError> {
        self.state
            .write()
            .unwrap()
            .archive
            .extend(blocks.iter().cloned());
        Ok(())
    }

    async fn write_sitemap(&self, xml: &str) -> Result<(), StoreError> {
        self.state.write().unwrap().sitemap = Some(xml.to_string());
        Ok(())
    }

    async fn write_rss(&self, xml: &str) -> Result<(), StoreError> {
        self.state.write().unwrap().rss = Some(xml.to_string());
        Ok(())
    }
}

// ============================================================================
// In-Memory Media Store
// ============================================================================

#[derive(Default, Clone)]
pub struct InMemoryMediaStore {
    saved: Arc<RwLock<Vec<(MediaKind, usize)>>>,
}

impl InMemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn save(&self, kind: MediaKind, data: &[u8]) -> Result<String, StoreError> {
        let mut saved = self.saved.write().unwrap();
        saved.push((kind, data.len()));
        let subdir = match kind {
            MediaKind::Photo => "photos",
            MediaKind::Video => "videos",
        };
        let ext = match kind {
            MediaKind::Photo => "jpg",
            MediaKind::Video => "mp4",
        };
        Ok(format!("/media/{}/mock-{}.{}", subdir, saved.len(), ext))
    }

    async fn remove_older_than(&self, _cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        Ok(0)
    }
}

// ============================================================================
// Recording Syndicator
// ============================================================================

#[derive(Default, Clone)]
pub struct RecordingSyndicator {
    items: Arc<RwLock<Vec<SyndicationItem>>>,
    fail: bool,
}

impl RecordingSyndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A syndicator whose every publish fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn published(&self) -> Vec<SyndicationItem> {
        self.items.read().unwrap().clone()
    }
}

#[async_trait]
impl Syndicator for RecordingSyndicator {
    async fn publish(&self, item: &SyndicationItem) -> Result<(), SyndicationError> {
        if self.fail {
            return Err(SyndicationError::Api {
                code: 100,
                message: "mock failure".to_string(),
            });
        }
        self.items.write().unwrap().push(item.clone());
        Ok(())
    }
}
