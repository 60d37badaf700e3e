//! Page-side feed loading for the svoinews site
//!
//! The site shows the latest news by splicing a prebuilt `news.html` fragment
//! into the `news-feed` container of the index page. This crate models that
//! step with two injected capabilities: a [`ResourceFetcher`] that turns a
//! relative path into text, and a [`ContentSink`] that appends markup to a
//! named container. Both the prerender binary and the bot reuse the same
//! splice, and tests run without any real page or network.

pub mod error;
pub mod fetch;
pub mod loader;
pub mod sink;

pub use error::{FetchError, LoadError, SinkError};
pub use fetch::{FileFetcher, HttpFetcher, ResourceFetcher};
pub use loader::FeedLoader;
pub use sink::{splice_into_container, BufferSink, ContentSink, DocumentSink};
