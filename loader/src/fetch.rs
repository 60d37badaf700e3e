//! Resource fetcher port and adapters
//!
//! A `ResourceFetcher` turns a relative resource path into the text of the
//! resource. The HTTP adapter is the page-side behavior; the file adapter
//! covers prerendering against an already-built site directory.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::FetchError;

/// Port trait for retrieving a fragment resource as text
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch the resource at a relative path and return its body as text
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;
}

/// Fetches resources over HTTP relative to a base URL
pub struct HttpFetcher {
    http: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        // Any response with a readable body counts as success; the status
        // code is never consulted.
        let response = self.http.get(self.url(path)).send().await?;
        Ok(response.text().await?)
    }
}

/// Fetches resources from a directory on disk
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ResourceFetcher for FileFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let full = self.root.join(path.trim_start_matches('/'));
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|source| FetchError::Io {
                path: full.display().to_string(),
                source,
            })
    }
}
