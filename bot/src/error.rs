//! Error types for the bot
//!
//! One enum per external system, plus `BotError` as the umbrella the sync
//! services return.

use thiserror::Error;

/// Telegram channel access errors
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Crossposting errors
#[derive(Debug, Error)]
pub enum SyndicationError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("media too large: {0} bytes")]
    MediaTooLarge(u64),

    #[error("unexpected response: {0}")]
    Deserialization(String),
}

/// Flat-file store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error for a sync pass
#[derive(Debug, Error)]
pub enum BotError {
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("syndication error: {0}")]
    Syndication(#[from] SyndicationError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("page error: {0}")]
    Page(#[from] svoinews_loader::SinkError),
}
