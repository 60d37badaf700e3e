//! Prerender hook
//!
//! Runs the feed loader once at startup: pull the `news.html` fragment and
//! append it into the `news-feed` container of the index page. It runs
//! exactly one pass, so invoking it twice appends twice, same as calling
//! [`FeedLoader::run`] twice. Configuration comes from the
//! environment; with `FEED_URL` set the fragment is fetched over HTTP,
//! otherwise it is read from the public directory.

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use svoinews_loader::{DocumentSink, FeedLoader, FileFetcher, HttpFetcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,svoinews_loader=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let public_dir =
        PathBuf::from(std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()));
    let resource = std::env::var("FEED_RESOURCE").unwrap_or_else(|_| "news.html".to_string());
    let container = std::env::var("FEED_CONTAINER").unwrap_or_else(|_| "news-feed".to_string());

    let sink = Arc::new(DocumentSink::new(public_dir.join("index.html")));

    tracing::info!(resource = %resource, container = %container, "prerendering feed");

    match std::env::var("FEED_URL") {
        Ok(base_url) => {
            let fetcher = Arc::new(HttpFetcher::new(base_url));
            FeedLoader::new(fetcher, sink, &resource, &container)
                .run()
                .await;
        }
        Err(_) => {
            let fetcher = Arc::new(FileFetcher::new(public_dir));
            FeedLoader::new(fetcher, sink, &resource, &container)
                .run()
                .await;
        }
    }

    Ok(())
}
