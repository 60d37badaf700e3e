//! Crossposting with content dedup
//!
//! The same news must not land on the wall twice, even when Telegram delivers
//! it again: posts are keyed by a hash of their cleaned text, persisted in
//! their own seen-store. A crosspost failure is logged and never blocks the
//! site build.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::app::cleaner::clean_text;
use crate::domain::ports::{SeenStore, SyndicationItem, Syndicator};
use crate::error::BotError;

/// Dedup key over the cleaned caption + text
pub fn content_key(caption: &str, text: &str) -> String {
    let cleaned = clean_text(&format!("{}{}", caption, text));
    hex::encode(Sha256::digest(cleaned.as_bytes()))
}

/// Service publishing new posts to the secondary platform
pub struct CrosspostService<SY, SS>
where
    SY: Syndicator,
    SS: SeenStore,
{
    syndicator: Arc<SY>,
    posted: Arc<SS>,
}

impl<SY, SS> CrosspostService<SY, SS>
where
    SY: Syndicator,
    SS: SeenStore,
{
    pub fn new(syndicator: Arc<SY>, posted: Arc<SS>) -> Self {
        Self { syndicator, posted }
    }

    /// Publish unless an identical post already went out.
    ///
    /// Returns whether anything was published. Errors from the platform are
    /// logged and reported as "not published"; only store errors propagate.
    pub async fn crosspost(&self, item: &SyndicationItem) -> Result<bool, BotError> {
        let key = content_key(&item.caption, &item.text);
        let mut posted = self.posted.load().await?;
        if posted.contains(&key) {
            tracing::debug!("duplicate crosspost skipped");
            return Ok(false);
        }

        match self.syndicator.publish(item).await {
            Ok(()) => {
                posted.insert(key);
                self.posted.save(&posted).await?;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "crosspost failed");
                Ok(false)
            }
        }
    }
}
