//! Error types for the feed loader
//!
//! One enum per capability, plus `LoadError` covering the whole
//! fetch-then-insert sequence.

use thiserror::Error;

/// Errors from a [`ResourceFetcher`](crate::ResourceFetcher)
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from a [`ContentSink`](crate::ContentSink)
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("target element not found: {0}")]
    TargetMissing(String),

    #[error("document error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from a complete load pass
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("insert failed: {0}")]
    Sink(#[from] SinkError),
}
