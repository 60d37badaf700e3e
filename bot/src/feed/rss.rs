//! RSS feed generation
//!
//! Items are re-extracted from the rendered blocks, so cards written by
//! earlier runs stay in the feed without any extra state.

use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;

use crate::feed::site_tz;

const CHANNEL_TITLE: &str = "Новости для Своих";
const CHANNEL_DESCRIPTION: &str = "Репосты из @newsSVOih";
const FALLBACK_LINK: &str = "https://t.me/newsSVOih";
const ITEM_LIMIT: usize = 20;

fn headline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<h3[^>]*>(.*?)</h3>").expect("valid regex"))
}

fn paragraph_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<p>(.*?)</p>").expect("valid regex"))
}

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<a href='(https://t\.me/[^']+)'").expect("valid regex"))
}

fn data_ts_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"data-ts='([^']+)'").expect("valid regex"))
}

fn first_capture<'a>(re: &Regex, block: &'a str) -> Option<&'a str> {
    re.captures(block)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Build `rss.xml` from the current feed blocks
pub fn generate_rss(site_base: &str, blocks: &[String]) -> String {
    let mut items = String::new();
    for block in blocks.iter().take(ITEM_LIMIT) {
        let title = first_capture(headline_re(), block)
            .or_else(|| first_capture(paragraph_re(), block))
            .unwrap_or("Новость");
        let link = first_capture(link_re(), block).unwrap_or(FALLBACK_LINK);
        let date = first_capture(data_ts_re(), block)
            .map(str::to_string)
            .unwrap_or_else(|| Utc::now().with_timezone(&site_tz()).to_rfc3339());

        items.push_str(&format!(
            "<item><title>{}</title><link>{}</link><description>{}</description><pubDate>{}</pubDate></item>\n",
            title, link, title, date
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\">\n<channel>\n<title>{}</title>\n<link>{}</link>\n<description>{}</description>\n{}</channel>\n</rss>",
        CHANNEL_TITLE, site_base, CHANNEL_DESCRIPTION, items
    )
}
