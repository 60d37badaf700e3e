//! Generated site pages under the public directory

use std::path::PathBuf;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use tokio::io::AsyncWriteExt;

use crate::domain::ports::FeedStore;
use crate::error::StoreError;

fn article_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<article class='news-item.*?>.*?</article>").expect("valid regex")
    })
}

/// Feed store writing `news.html`, `archive.html`, `sitemap.xml` and
/// `rss.xml` under the public directory
pub struct FileFeedStore {
    public_dir: PathBuf,
}

impl FileFeedStore {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.public_dir.join(name)
    }

    async fn write_page(&self, name: &str, body: &str) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.public_dir).await?;
        tokio::fs::write(self.path(name), body).await?;
        Ok(())
    }
}

#[async_trait]
impl FeedStore for FileFeedStore {
    async fn load_blocks(&self) -> Result<Vec<String>, StoreError> {
        match tokio::fs::read_to_string(self.path("news.html")).await {
            Ok(raw) => Ok(article_re()
                .find_iter(&raw)
                .map(|m| m.as_str().to_string())
                .collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_feed(&self, page: &str) -> Result<(), StoreError> {
        self.write_page("news.html", page).await
    }

    async fn append_archive(&self, blocks: &[String]) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.public_dir).await?;
        let path = self.path("archive.html");

        let fresh = match tokio::fs::metadata(&path).await {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        if fresh {
            file.write_all("  <!-- Архивные карточки -->\n".as_bytes())
                .await?;
        }
        for block in blocks {
            file.write_all(format!("  {}\n", block.trim()).as_bytes())
                .await?;
        }
        file.flush().await?;
        Ok(())
    }

    async fn write_sitemap(&self, xml: &str) -> Result<(), StoreError> {
        self.write_page("sitemap.xml", xml).await
    }

    async fn write_rss(&self, xml: &str) -> Result<(), StoreError> {
        self.write_page("rss.xml", xml).await
    }
}
