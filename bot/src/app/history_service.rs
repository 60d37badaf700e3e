//! History page sync
//!
//! The history channel feeds a separate page; new posts get rendered as
//! history items and spliced into the `history-container` element through
//! the shared content sink.

use std::sync::Arc;

use svoinews_loader::ContentSink;

use crate::domain::ports::{ChannelSource, MediaStore, SeenStore};
use crate::error::BotError;
use crate::feed::render_history_item;

const HISTORY_CONTAINER: &str = "history-container";

/// Service appending history-channel posts to the history page
pub struct HistoryService<C, S, M, K>
where
    C: ChannelSource,
    S: SeenStore,
    M: MediaStore,
    K: ContentSink,
{
    channel: Arc<C>,
    seen: Arc<S>,
    media: Arc<M>,
    sink: Arc<K>,
    site_base_url: String,
}

impl<C, S, M, K> HistoryService<C, S, M, K>
where
    C: ChannelSource,
    S: SeenStore,
    M: MediaStore,
    K: ContentSink,
{
    pub fn new(
        channel: Arc<C>,
        seen: Arc<S>,
        media: Arc<M>,
        sink: Arc<K>,
        site_base_url: &str,
    ) -> Self {
        Self {
            channel,
            seen,
            media,
            sink,
            site_base_url: site_base_url.to_string(),
        }
    }

    /// Append all unseen posts to the history page; returns how many
    pub async fn run_once(&self) -> Result<usize, BotError> {
        let posts = self.channel.latest_posts().await?;
        let mut seen = self.seen.load().await?;

        let mut items = Vec::new();
        for post in &posts {
            let id = post.message_id.to_string();
            if seen.contains(&id) {
                continue;
            }

            let content = post
                .text
                .clone()
                .or_else(|| post.caption.clone())
                .unwrap_or_else(|| "Без текста".to_string());

            let mut stored = None;
            if let Some(media) = &post.media {
                match self.channel.fetch_media(&media.file_id).await {
                    Ok(data) => {
                        stored = Some((media.kind, self.media.save(media.kind, &data).await?));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, post_id = post.message_id, "history media download failed");
                    }
                }
            }

            items.push(render_history_item(
                &content,
                stored.as_ref().map(|(kind, path)| (*kind, path.as_str())),
                post.date,
                &self.site_base_url,
            ));
            seen.insert(id);
        }

        if items.is_empty() {
            tracing::info!("no new history items");
            return Ok(0);
        }

        self.sink.append(HISTORY_CONTAINER, &items.join("\n")).await?;
        self.seen.save(&seen).await?;
        tracing::info!(count = items.len(), "history page updated");
        Ok(items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        test_photo_post, test_post, InMemoryChannelSource, InMemoryMediaStore, InMemorySeenStore,
    };
    use svoinews_loader::BufferSink;

    fn service(
        channel: InMemoryChannelSource,
        seen: InMemorySeenStore,
        sink: Arc<BufferSink>,
    ) -> HistoryService<InMemoryChannelSource, InMemorySeenStore, InMemoryMediaStore, BufferSink>
    {
        HistoryService::new(
            Arc::new(channel),
            Arc::new(seen),
            Arc::new(InMemoryMediaStore::new()),
            sink,
            "https://newsforsvoi.ru",
        )
    }

    #[tokio::test]
    async fn new_items_spliced_into_container() {
        let sink = Arc::new(BufferSink::new().with_container(HISTORY_CONTAINER, ""));
        let channel = InMemoryChannelSource::new().with_post(test_post(1, "Годовщина"));
        let seen = InMemorySeenStore::new();
        let svc = service(channel, seen.clone(), sink.clone());

        assert_eq!(svc.run_once().await.unwrap(), 1);
        let content = sink.content_of(HISTORY_CONTAINER).unwrap();
        assert!(content.contains("Годовщина"));
        assert!(seen.contains("1").await);
    }

    #[tokio::test]
    async fn second_run_adds_nothing() {
        let sink = Arc::new(BufferSink::new().with_container(HISTORY_CONTAINER, ""));
        let channel = InMemoryChannelSource::new().with_post(test_post(1, "Событие"));
        let seen = InMemorySeenStore::new();
        let svc = service(channel, seen, sink.clone());

        svc.run_once().await.unwrap();
        let after_first = sink.content_of(HISTORY_CONTAINER).unwrap();
        assert_eq!(svc.run_once().await.unwrap(), 0);
        assert_eq!(sink.content_of(HISTORY_CONTAINER).unwrap(), after_first);
    }

    #[tokio::test]
    async fn media_saved_and_referenced() {
        let sink = Arc::new(BufferSink::new().with_container(HISTORY_CONTAINER, ""));
        let channel = InMemoryChannelSource::new()
            .with_post(test_photo_post(3, "Фото из архива"))
            .with_media("photo-3", b"jpeg".to_vec());
        let svc = service(channel, InMemorySeenStore::new(), sink.clone());

        svc.run_once().await.unwrap();
        let content = sink.content_of(HISTORY_CONTAINER).unwrap();
        assert!(content.contains("/media/photos/"));
        assert!(content.contains("history-image"));
    }

    #[tokio::test]
    async fn missing_container_propagates() {
        let sink = Arc::new(BufferSink::new());
        let channel = InMemoryChannelSource::new().with_post(test_post(1, "x"));
        let svc = service(channel, InMemorySeenStore::new(), sink);

        let err = svc.run_once().await.unwrap_err();
        assert!(matches!(err, BotError::Page(_)));
    }
}
