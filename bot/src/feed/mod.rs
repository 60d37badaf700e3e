//! Feed page rendering
//!
//! Renders cards, the feed page and the site metadata files. Everything is
//! plain string building; the page structure is fixed.

pub mod renderer;
pub mod rss;
pub mod sitemap;

use chrono::FixedOffset;

pub use renderer::{
    extract_post_id, extract_timestamp, mark_hidden, render_card, render_feed_page,
    render_history_item, strip_for_archive,
};
pub use rss::generate_rss;
pub use sitemap::generate_sitemap;

/// Site timezone: Moscow, fixed +03:00 (no DST since 2014)
pub fn site_tz() -> FixedOffset {
    FixedOffset::east_opt(3 * 3600).expect("valid offset")
}
