//! Card and page renderers
//!
//! The feed page is a flat list of `<article class='news-item'>` blocks;
//! the renderer also re-reads those blocks for archive rotation, so the
//! block surgery helpers live here next to the markup they inspect.

use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, Utc};
use regex::Regex;
use serde_json::json;

use crate::domain::entities::{MediaKind, NewsCard};
use crate::feed::site_tz;

const PUBLISHER_NAME: &str = "Новости для Своих";

fn post_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"id='post-(\d+)'").expect("valid regex"))
}

fn data_ts_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"data-ts='([^']+)'").expect("valid regex"))
}

fn media_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<img[^>]*>|<video[^>]*>.*?</video>").expect("valid regex")
    })
}

fn ld_json_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<script type='application/ld\+json'>.*?</script>").expect("valid regex")
    })
}

fn tg_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https://t\.me/[^']+").expect("valid regex"))
}

/// Render one card to its article block
pub fn render_card(card: &NewsCard, site_base: &str) -> String {
    let mut buf = String::new();

    if let Some(category) = card.category {
        buf.push_str(&format!(
            "<h2 class='category-header'>{}</h2>\n",
            category.label()
        ));
    }

    let urgency_class = if card.urgent { " urgent" } else { "" };
    buf.push_str(&format!(
        "<article class='news-item{}' id='post-{}' lang='ru'>\n",
        urgency_class, card.post_id
    ));
    if card.urgent {
        buf.push_str("<p class='urgency-label'>СРОЧНО:</p>\n");
    }
    buf.push_str(&format!(
        "<h3 class='news-headline'>{}</h3>\n",
        card.headline
    ));

    if let Some(media) = &card.media {
        match media.kind {
            MediaKind::Photo => {
                buf.push_str(&format!(
                    "<img src=\"{}\" alt=\"Фото: {}\" loading=\"lazy\">\n",
                    media.public_path, card.headline
                ));
            }
            MediaKind::Video => {
                buf.push_str("<video controls preload=\"metadata\">\n");
                buf.push_str(&format!(
                    "  <source src=\"{}\" type=\"video/mp4\">\n",
                    media.public_path
                ));
                buf.push_str("  Ваш браузер не поддерживает видео.\n");
                buf.push_str("</video>\n");
            }
        }
    }

    if !card.caption.is_empty() {
        buf.push_str(&format!("<p class='news-text'>{}</p>\n", card.caption));
    }
    if !card.body.is_empty() && card.body != card.caption {
        buf.push_str(&format!("<p class='news-text'>{}</p>\n", card.body));
    }

    let iso = card.published_at.format("%Y-%m-%dT%H:%M:%S%:z");
    let shown = card.published_at.format("%d.%m.%Y %H:%M");
    buf.push_str(&format!(
        "<p class='timestamp' data-ts='{}'>{}</p>\n",
        iso, shown
    ));
    buf.push_str(&format!(
        "<p class='source'>Источник: <a href='{}' target='_blank' rel='noopener'>{}</a></p>\n",
        card.telegram_url, PUBLISHER_NAME
    ));

    if card.group_size > 1 {
        buf.push_str(&format!(
            "<p class='more-media'><a href='{}' target='_blank' rel='noopener'>Ещё {} фото/видео в Telegram</a></p>\n",
            card.telegram_url,
            card.group_size - 1
        ));
    }

    let mut microdata = json!({
        "@context": "https://schema.org",
        "@type": "NewsArticle",
        "headline": card.headline,
        "datePublished": iso.to_string(),
        "author": {"@type": "Organization", "name": PUBLISHER_NAME},
        "publisher": {
            "@type": "Organization",
            "name": PUBLISHER_NAME,
            "logo": {"@type": "ImageObject", "url": format!("{}/logo.png", site_base)},
        },
        "articleBody": format!("{}\n{}", card.caption, card.body).trim(),
        "url": card.telegram_url,
    });
    if let Some(media) = &card.media {
        if media.kind == MediaKind::Photo {
            microdata["image"] = json!(format!("{}{}", site_base, media.public_path));
        }
    }
    buf.push_str(&format!(
        "<script type='application/ld+json'>{}</script>\n",
        microdata
    ));
    buf.push_str("</article>\n");
    buf
}

/// Render an item for the history page
pub fn render_history_item(
    content: &str,
    media: Option<(MediaKind, &str)>,
    published_at: DateTime<Utc>,
    site_base: &str,
) -> String {
    let local = published_at.with_timezone(&site_tz());
    let iso = local.format("%Y-%m-%dT%H:%M:%S%:z").to_string();
    let days_ago = (Utc::now() - published_at).num_days();

    let mut buf = String::from(
        "<article class=\"news-item\" itemscope itemtype=\"https://schema.org/NewsArticle\">",
    );
    match media {
        Some((MediaKind::Photo, path)) => {
            buf.push_str(&format!(
                "<img src=\"{}\" alt=\"Фото события\" class=\"history-image\" itemprop=\"image\" />",
                path
            ));
        }
        Some((MediaKind::Video, path)) => {
            buf.push_str(&format!(
                "<video controls src=\"{}\" itemprop=\"video\"></video>",
                path
            ));
        }
        None => {}
    }
    buf.push_str(&format!("<p itemprop=\"headline\">{}</p>", content));
    buf.push_str(&format!(
        "<div class=\"timestamp\" data-ts=\"{}\">{} дней назад</div>",
        published_at.timestamp_millis(),
        days_ago
    ));

    let headline: String = if content.chars().count() > 50 {
        format!("{}...", content.chars().take(50).collect::<String>())
    } else {
        content.to_string()
    };
    let mut microdata = json!({
        "@context": "https://schema.org",
        "@type": "NewsArticle",
        "headline": headline,
        "datePublished": iso,
        "author": {"@type": "Organization", "name": PUBLISHER_NAME},
        "publisher": {
            "@type": "Organization",
            "name": PUBLISHER_NAME,
            "logo": {"@type": "ImageObject", "url": format!("{}/logo.png", site_base)},
        },
        "articleBody": content,
    });
    if let Some((MediaKind::Photo, path)) = media {
        microdata["image"] = json!(format!("{}{}", site_base, path));
    }
    buf.push_str(&format!(
        "<script type=\"application/ld+json\" itemprop=\"mainEntityOfPage\">{}</script>",
        microdata
    ));
    buf.push_str("</article>");
    buf
}

/// Assemble the feed page from article blocks
pub fn render_feed_page(blocks: &[String]) -> String {
    let mut page = String::new();
    for block in blocks {
        page.push_str(block);
        page.push('\n');
    }
    if blocks.iter().any(|b| b.contains("hidden")) {
        page.push_str("<button id=\"show-more\" style=\"padding:10px 20px;background:#0077cc;color:#fff;border:none;border-radius:4px;cursor:pointer\">Показать ещё</button>\n");
        page.push_str("<script>document.getElementById(\"show-more\").onclick=()=>{document.querySelectorAll(\".hidden\").forEach(e=>e.classList.remove(\"hidden\"));this.style.display=\"none\"};</script>\n");
    }
    page
}

/// Mark a freshly rendered block as below the fold
pub fn mark_hidden(block: &str) -> String {
    block.replacen("class='news-item", "class='news-item hidden", 1)
}

/// Post id embedded in a rendered block
pub fn extract_post_id(block: &str) -> Option<i64> {
    post_id_re()
        .captures(block)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Publish time embedded in a rendered block
pub fn extract_timestamp(block: &str) -> Option<DateTime<FixedOffset>> {
    let raw = data_ts_re().captures(block)?.get(1)?.as_str();
    DateTime::parse_from_rfc3339(raw).ok()
}

/// Strip a block down for the archive page: no media, no structured data,
/// but always a source link
pub fn strip_for_archive(block: &str) -> String {
    let stripped = media_re().replace_all(block, "");
    let mut stripped = ld_json_re().replace_all(&stripped, "").into_owned();
    if !stripped.contains("Источник:") {
        if let Some(link) = tg_link_re().find(block) {
            stripped.push_str(&format!(
                "\n<p class='source'>Источник: <a href='{}' target='_blank' rel='noopener'>{}</a></p>\n",
                link.as_str(),
                PUBLISHER_NAME
            ));
        }
    }
    stripped
}
