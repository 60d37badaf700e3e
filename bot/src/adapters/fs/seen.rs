//! Newline-delimited seen-id files

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::ports::SeenStore;
use crate::error::StoreError;

/// Seen-id store backed by a flat text file, one id per line
pub struct FileSeenStore {
    path: PathBuf,
}

impl FileSeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SeenStore for FileSeenStore {
    async fn load(&self) -> Result<HashSet<String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(raw
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashSet::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, ids: &HashSet<String>) -> Result<(), StoreError> {
        let mut lines: Vec<&str> = ids.iter().map(String::as_str).collect();
        lines.sort_unstable();
        let mut body = lines.join("\n");
        body.push('\n');
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }
}
