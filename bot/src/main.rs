//! svoinews bot
//!
//! One-shot sync run (cron-style): mirror the latest Telegram channel posts
//! onto the static news site, crosspost them to VK, and update the history
//! page. Uses a ports & adapters layout so every external system can be
//! swapped for an in-memory double in tests.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use svoinews_loader::DocumentSink;

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod feed;

#[cfg(test)]
mod test_utils;

use adapters::{FileFeedStore, FileSeenStore, MediaDir, TelegramChannelClient, VkWallClient};
use app::{CrosspostService, HistoryService, SyncService};
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,svoinews_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let channel = Arc::new(TelegramChannelClient::new(
        config.telegram_token.clone(),
        config.news_channel.clone(),
    ));
    let feed_store = Arc::new(FileFeedStore::new(&config.public_dir));
    let media = Arc::new(MediaDir::new(&config.public_dir));
    let seen = Arc::new(FileSeenStore::new(&config.seen_ids_file));

    let crosspost = match (&config.vk_token, &config.vk_group_id) {
        (Some(token), Some(group_id)) => Some(Arc::new(CrosspostService::new(
            Arc::new(VkWallClient::new(token.clone(), group_id.clone())),
            Arc::new(FileSeenStore::new(&config.vk_posted_file)),
        ))),
        _ => {
            tracing::info!("VK crossposting not configured");
            None
        }
    };

    let sync = SyncService::new(
        channel,
        feed_store,
        media.clone(),
        seen,
        crosspost,
        &config.news_channel,
        &config.site_base_url,
    );

    let outcome = sync.run_once().await?;
    tracing::info!(
        added = outcome.added,
        archived = outcome.archived,
        media_removed = outcome.media_removed,
        "news sync finished"
    );

    // The history page has its own channel, token and seen-id file.
    if let Some(history_token) = config.history_token.clone() {
        let history_channel = Arc::new(TelegramChannelClient::new(
            history_token,
            config.history_channel.clone(),
        ));
        let history = HistoryService::new(
            history_channel,
            Arc::new(FileSeenStore::new(&config.history_seen_file)),
            media,
            Arc::new(DocumentSink::new(config.public_dir.join("history.html"))),
            &config.site_base_url,
        );
        match history.run_once().await {
            Ok(count) => tracing::info!(count, "history sync finished"),
            Err(e) => tracing::warn!(error = %e, "history sync failed"),
        }
    }

    Ok(())
}
