//! News sync pass
//!
//! One cron-style run: pull the latest channel posts, turn the unseen ones
//! into cards, crosspost them, rotate stale cards into the archive and
//! rewrite the feed page plus the site metadata files.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::app::cleaner::{clean_text, strip_urgent_tag};
use crate::app::crosspost_service::CrosspostService;
use crate::domain::entities::{
    headline_of, CardMedia, Category, ChannelPost, MediaKind, NewsCard, MAX_VIDEO_BYTES,
    VISIBLE_CAP,
};
use crate::domain::ports::{
    ChannelSource, FeedStore, MediaStore, SeenStore, SyndicationItem, SyndicationMedia,
    Syndicator,
};
use crate::error::BotError;
use crate::feed::{
    extract_post_id, extract_timestamp, generate_rss, generate_sitemap, mark_hidden, render_card,
    render_feed_page, site_tz, strip_for_archive,
};

/// Cards move from the feed page to the archive after this many days
const ARCHIVE_AFTER_DAYS: i64 = 2;

/// What one sync pass did
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    pub added: usize,
    pub archived: usize,
    pub media_removed: usize,
}

/// Service running the channel-to-site sync
pub struct SyncService<C, F, M, S, SY, PS>
where
    C: ChannelSource,
    F: FeedStore,
    M: MediaStore,
    S: SeenStore,
    SY: Syndicator,
    PS: SeenStore,
{
    channel: Arc<C>,
    feed: Arc<F>,
    media: Arc<M>,
    seen: Arc<S>,
    crosspost: Option<Arc<CrosspostService<SY, PS>>>,
    /// Channel handle without the leading `@`, for permalinks
    channel_name: String,
    site_base_url: String,
}

impl<C, F, M, S, SY, PS> SyncService<C, F, M, S, SY, PS>
where
    C: ChannelSource,
    F: FeedStore,
    M: MediaStore,
    S: SeenStore,
    SY: Syndicator,
    PS: SeenStore,
{
    pub fn new(
        channel: Arc<C>,
        feed: Arc<F>,
        media: Arc<M>,
        seen: Arc<S>,
        crosspost: Option<Arc<CrosspostService<SY, PS>>>,
        channel_handle: &str,
        site_base_url: &str,
    ) -> Self {
        Self {
            channel,
            feed,
            media,
            seen,
            crosspost,
            channel_name: channel_handle.trim_start_matches('@').to_string(),
            site_base_url: site_base_url.to_string(),
        }
    }

    /// Run one complete sync pass
    pub async fn run_once(&self) -> Result<SyncOutcome, BotError> {
        let posts = self.channel.latest_posts().await?;
        if posts.is_empty() {
            tracing::info!("no new posts");
            return Ok(SyncOutcome::default());
        }

        let mut outcome = SyncOutcome::default();
        let mut seen = self.seen.load().await?;
        let blocks = self.feed.load_blocks().await?;
        let page_ids: HashSet<i64> = blocks.iter().filter_map(|b| extract_post_id(b)).collect();

        // Rotate stale cards out first so the visible count is accurate.
        let now = Utc::now().with_timezone(&site_tz());
        let cutoff = now - Duration::days(ARCHIVE_AFTER_DAYS);
        let mut kept = Vec::with_capacity(blocks.len());
        let mut archived = Vec::new();
        for block in blocks {
            match extract_timestamp(&block) {
                Some(ts) if ts < cutoff => archived.push(strip_for_archive(&block)),
                _ => kept.push(block),
            }
        }
        if !archived.is_empty() {
            self.feed.append_archive(&archived).await?;
            tracing::info!(count = archived.len(), "cards moved to archive");
        }
        outcome.archived = archived.len();
        outcome.media_removed = self
            .media
            .remove_older_than(cutoff.with_timezone(&Utc))
            .await?;

        // Album posts arrive as separate messages sharing a media group id.
        let mut groups: Vec<(String, Vec<ChannelPost>)> = Vec::new();
        for post in posts {
            let key = post.group_key();
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, group)) => group.push(post),
                None => groups.push((key, vec![post])),
            }
        }

        let mut new_ids: HashSet<String> = HashSet::new();
        let mut regular: Vec<NewsCard> = Vec::new();
        let mut urgent_group: Option<(String, Vec<ChannelPost>)> = None;

        for (key, group) in groups {
            if seen.contains(&key) || new_ids.contains(&key) {
                continue;
            }
            if group.iter().any(ChannelPost::is_urgent) {
                // Handled after the regular batch so it lands on top.
                urgent_group = Some((key, group));
                continue;
            }
            if let Some(card) = self.publish_group(&group, false, &page_ids).await? {
                new_ids.insert(key);
                regular.push(card);
            }
        }

        let mut urgent_card = None;
        if let Some((key, group)) = urgent_group {
            if let Some(card) = self.publish_group(&group, true, &page_ids).await? {
                tracing::info!(post_id = card.post_id, "urgent post published");
                new_ids.insert(key);
                urgent_card = Some(card);
            }
        }

        if regular.is_empty() && urgent_card.is_none() {
            return Ok(outcome);
        }

        // Newest first; an urgent card outranks the dates.
        regular.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        let new_cards: Vec<NewsCard> = urgent_card.into_iter().chain(regular).collect();
        outcome.added = new_cards.len();

        let mut visible = kept.iter().filter(|b| !b.contains("hidden")).count();
        let mut fresh = Vec::with_capacity(new_cards.len() + kept.len());
        for card in &new_cards {
            let mut block = render_card(card, &self.site_base_url);
            if visible >= VISIBLE_CAP {
                block = mark_hidden(&block);
            }
            fresh.push(block);
            visible += 1;
        }
        fresh.extend(kept);

        self.feed.write_feed(&render_feed_page(&fresh)).await?;
        seen.extend(new_ids);
        self.seen.save(&seen).await?;
        self.feed
            .write_sitemap(&generate_sitemap(&self.site_base_url, now))
            .await?;
        self.feed
            .write_rss(&generate_rss(&self.site_base_url, &fresh))
            .await?;

        tracing::info!(
            added = outcome.added,
            archived = outcome.archived,
            "sync complete"
        );
        Ok(outcome)
    }

    /// Build the card for one message group and crosspost it.
    ///
    /// Returns `None` when the group produces no card (already on the page,
    /// or its video is too large).
    async fn publish_group(
        &self,
        group: &[ChannelPost],
        urgent: bool,
        page_ids: &HashSet<i64>,
    ) -> Result<Option<NewsCard>, BotError> {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            return Ok(None);
        };
        if page_ids.contains(&last.message_id) {
            tracing::debug!(post_id = last.message_id, "already on the page");
            return Ok(None);
        }

        let Some((card, media)) = self.build_card(first, last, group.len(), urgent).await?
        else {
            return Ok(None);
        };

        if let Some(crosspost) = &self.crosspost {
            let item = SyndicationItem {
                caption: clean_text(first.caption.as_deref().unwrap_or("")),
                text: clean_text(last.text.as_deref().unwrap_or("")),
                media,
            };
            // The site build must survive any crosspost failure, including
            // a broken posted-ids store.
            if let Err(e) = crosspost.crosspost(&item).await {
                tracing::warn!(error = %e, post_id = last.message_id, "crosspost failed");
            }
        }

        Ok(Some(card))
    }

    async fn build_card(
        &self,
        first: &ChannelPost,
        last: &ChannelPost,
        group_size: usize,
        urgent: bool,
    ) -> Result<Option<(NewsCard, Option<SyndicationMedia>)>, BotError> {
        let caption = clean_text(first.caption.as_deref().unwrap_or(""));
        let text = clean_text(last.text.as_deref().unwrap_or(""));
        let full = strip_urgent_tag(&format!("{} {}", caption, text));

        // The caption is whatever precedes the body text in the combined
        // string; when they don't line up the whole thing is the caption.
        let (caption, body) = match (!text.is_empty()).then(|| full.find(&text)).flatten() {
            Some(at) => (full[..at].trim().to_string(), text),
            None => (full.trim().to_string(), String::new()),
        };

        let headline = headline_of(&caption, &body);
        let category = Category::detect(&format!("{} {}", caption, body));

        let mut card_media = None;
        let mut synd_media = None;
        if let Some(media) = &last.media {
            if media.kind == MediaKind::Video && media.file_size.unwrap_or(0) > MAX_VIDEO_BYTES {
                tracing::info!(
                    post_id = last.message_id,
                    size = media.file_size,
                    "video too large, skipping post"
                );
                return Ok(None);
            }
            match self.channel.fetch_media(&media.file_id).await {
                Ok(data) => {
                    if media.kind == MediaKind::Video && data.len() as u64 > MAX_VIDEO_BYTES {
                        tracing::info!(post_id = last.message_id, "video too large, skipping post");
                        return Ok(None);
                    }
                    let public_path = self.media.save(media.kind, &data).await?;
                    card_media = Some(CardMedia {
                        kind: media.kind,
                        public_path,
                    });
                    synd_media = Some(SyndicationMedia {
                        kind: media.kind,
                        data,
                    });
                }
                Err(e) => {
                    // The card still runs without its picture.
                    tracing::warn!(error = %e, post_id = last.message_id, "media download failed");
                }
            }
        }

        let card = NewsCard {
            post_id: last.message_id,
            headline,
            category,
            urgent,
            caption,
            body,
            media: card_media,
            published_at: last.date.with_timezone(&site_tz()),
            telegram_url: format!("https://t.me/{}/{}", self.channel_name, last.message_id),
            group_size,
        };
        Ok(Some((card, synd_media)))
    }
}
