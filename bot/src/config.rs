use std::env;
use std::path::PathBuf;

#[derive(Clone)]
pub struct Config {
    pub telegram_token: String,
    /// Separate bot token for the history channel, if that page is synced
    pub history_token: Option<String>,
    pub news_channel: String,
    pub history_channel: String,
    pub public_dir: PathBuf,
    pub seen_ids_file: PathBuf,
    pub vk_posted_file: PathBuf,
    pub history_seen_file: PathBuf,
    pub site_base_url: String,
    /// VK crossposting credentials; both must be set for crossposting to run
    pub vk_token: Option<String>,
    pub vk_group_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            telegram_token: env::var("TELEGRAM_TOKEN").expect("TELEGRAM_TOKEN must be set"),
            history_token: env::var("TELEGRAM_HISTORY_TOKEN").ok(),
            news_channel: env::var("NEWS_CHANNEL").unwrap_or_else(|_| "@newsSVOih".to_string()),
            history_channel: env::var("HISTORY_CHANNEL")
                .unwrap_or_else(|_| "@historySvoih".to_string()),
            public_dir: env::var("PUBLIC_DIR")
                .unwrap_or_else(|_| "public".to_string())
                .into(),
            seen_ids_file: env::var("SEEN_IDS_FILE")
                .unwrap_or_else(|_| "seen_ids.txt".to_string())
                .into(),
            vk_posted_file: env::var("VK_POSTED_FILE")
                .unwrap_or_else(|_| "vk_posted.txt".to_string())
                .into(),
            history_seen_file: env::var("HISTORY_SEEN_FILE")
                .unwrap_or_else(|_| "seen_ids1.txt".to_string())
                .into(),
            site_base_url: env::var("SITE_BASE_URL")
                .unwrap_or_else(|_| "https://newsforsvoi.ru".to_string()),
            vk_token: env::var("VK_TOKEN").ok(),
            vk_group_id: env::var("VK_GROUP_ID").ok(),
        }
    }
}
