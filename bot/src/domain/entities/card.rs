//! Rendered news card model

use chrono::{DateTime, FixedOffset};

use super::post::MediaKind;

/// Videos above this size are skipped for both the site and crossposting
pub const MAX_VIDEO_BYTES: u64 = 20_000_000;

/// Cards visible on the feed page before the "show more" fold
pub const VISIBLE_CAP: usize = 12;

/// Category header shown above a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Russia,
    Space,
    World,
}

impl Category {
    const RUSSIA_KEYWORDS: &'static [&'static str] = &["Россия"];
    const SPACE_KEYWORDS: &'static [&'static str] = &["Космос"];
    const WORLD_KEYWORDS: &'static [&'static str] = &[
        "Израиль", "Газа", "Мексика", "США", "Китай", "Тайвань", "Мир",
    ];

    /// Keyword detection over the cleaned caption + text
    pub fn detect(text: &str) -> Option<Self> {
        let hit = |keys: &[&str]| keys.iter().any(|k| text.contains(k));
        if hit(Self::RUSSIA_KEYWORDS) {
            Some(Category::Russia)
        } else if hit(Self::SPACE_KEYWORDS) {
            Some(Category::Space)
        } else if hit(Self::WORLD_KEYWORDS) {
            Some(Category::World)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Russia => "Россия",
            Category::Space => "Космос",
            Category::World => "Мир",
        }
    }
}

/// Media already downloaded and stored under the public directory
#[derive(Debug, Clone)]
pub struct CardMedia {
    pub kind: MediaKind,
    /// Site-relative path, e.g. `/media/photos/<hash>.jpg`
    pub public_path: String,
}

/// Everything needed to render one feed card
#[derive(Debug, Clone)]
pub struct NewsCard {
    pub post_id: i64,
    pub headline: String,
    pub category: Option<Category>,
    pub urgent: bool,
    pub caption: String,
    pub body: String,
    pub media: Option<CardMedia>,
    pub published_at: DateTime<FixedOffset>,
    pub telegram_url: String,
    /// Number of posts in the media group this card represents
    pub group_size: usize,
}

/// First 100 characters of the caption (or body, or a stub), with an
/// ellipsis when the combined text is longer
pub fn headline_of(caption: &str, body: &str) -> String {
    let base = if !caption.is_empty() {
        caption
    } else if !body.is_empty() {
        body
    } else {
        "Новость"
    };
    let mut headline: String = base.chars().take(100).collect();
    if caption.chars().count() + body.chars().count() > 100 {
        headline.push_str("...");
    }
    headline
}
