//! Domain ports (traits)
//!
//! Interfaces the pipeline requires from external systems. Adapters provide
//! the concrete implementations.

pub mod channel;
pub mod stores;
pub mod syndicator;

pub use channel::ChannelSource;
pub use stores::{FeedStore, MediaStore, SeenStore};
pub use syndicator::{SyndicationItem, SyndicationMedia, Syndicator};
