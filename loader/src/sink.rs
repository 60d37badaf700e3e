//! Content sink port and adapters
//!
//! A `ContentSink` appends markup to the end of a named container's content.
//! Existing content is never cleared; two appends leave two copies in order.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::SinkError;

/// Port trait for appending markup into a named target
#[async_trait]
pub trait ContentSink: Send + Sync {
    /// Append markup at the end of the content of the element with this id
    async fn append(&self, target_id: &str, markup: &str) -> Result<(), SinkError>;
}

/// In-memory sink keyed by container id
///
/// Stands in for a live page in tests and doubles as a scratch target when no
/// document exists yet.
#[derive(Default)]
pub struct BufferSink {
    containers: RwLock<HashMap<String, String>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container, optionally with pre-existing content
    pub fn with_container(self, id: &str, content: &str) -> Self {
        self.containers
            .write()
            .unwrap()
            .insert(id.to_string(), content.to_string());
        self
    }

    /// Current content of a container, if it exists
    pub fn content_of(&self, id: &str) -> Option<String> {
        self.containers.read().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl ContentSink for BufferSink {
    async fn append(&self, target_id: &str, markup: &str) -> Result<(), SinkError> {
        let mut containers = self.containers.write().unwrap();
        match containers.get_mut(target_id) {
            Some(content) => {
                content.push_str(markup);
                Ok(())
            }
            None => Err(SinkError::TargetMissing(target_id.to_string())),
        }
    }
}

/// Sink backed by an HTML document on disk
///
/// Locates the element carrying the requested id and inserts the markup right
/// before its closing tag, leaving everything else in the document untouched.
pub struct DocumentSink {
    path: PathBuf,
}

impl DocumentSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContentSink for DocumentSink {
    async fn append(&self, target_id: &str, markup: &str) -> Result<(), SinkError> {
        let doc = tokio::fs::read_to_string(&self.path).await?;
        let updated = splice_into_container(&doc, target_id, markup)?;
        tokio::fs::write(&self.path, updated).await?;
        Ok(())
    }
}

/// Insert `markup` just before the closing tag of the element with `target_id`
pub fn splice_into_container(
    doc: &str,
    target_id: &str,
    markup: &str,
) -> Result<String, SinkError> {
    let missing = || SinkError::TargetMissing(target_id.to_string());

    let attr_at = doc
        .find(&format!("id=\"{}\"", target_id))
        .or_else(|| doc.find(&format!("id='{}'", target_id)))
        .ok_or_else(missing)?;

    // Walk back to the opening '<' and read the tag name.
    let tag_start = doc[..attr_at].rfind('<').ok_or_else(missing)?;
    let tag_name: String = doc[tag_start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if tag_name.is_empty() {
        return Err(missing());
    }

    let open_end = doc[attr_at..]
        .find('>')
        .map(|i| attr_at + i + 1)
        .ok_or_else(missing)?;

    let open_pat = format!("<{}", tag_name);
    let close_pat = format!("</{}", tag_name);

    // Scan for the matching close, accounting for nested same-name elements.
    let mut depth: usize = 1;
    let mut cursor = open_end;
    let insert_at = loop {
        let at = match doc[cursor..].find('<') {
            Some(rel) => cursor + rel,
            None => return Err(missing()),
        };
        let rest = &doc[at..];
        if rest.len() > close_pat.len()
            && rest.starts_with(&close_pat)
            && rest.as_bytes()[close_pat.len()] == b'>'
        {
            depth -= 1;
            if depth == 0 {
                break at;
            }
        } else if rest.len() > open_pat.len()
            && rest.starts_with(&open_pat)
            && matches!(rest.as_bytes()[open_pat.len()], b'>' | b' ' | b'\t' | b'\n')
        {
            depth += 1;
        }
        cursor = at + 1;
    };

    let mut out = String::with_capacity(doc.len() + markup.len());
    out.push_str(&doc[..insert_at]);
    out.push_str(markup);
    out.push_str(&doc[insert_at..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splice_appends_before_closing_tag() {
        let doc = r#"<body><div id="news-feed"><p>old</p></div></body>"#;
        let out = splice_into_container(doc, "news-feed", "<p>new</p>").unwrap();
        assert_eq!(
            out,
            r#"<body><div id="news-feed"><p>old</p><p>new</p></div></body>"#
        );
    }

    #[test]
    fn splice_handles_nested_divs() {
        let doc = r#"<div id="news-feed"><div class="card">a</div></div><div>tail</div>"#;
        let out = splice_into_container(doc, "news-feed", "X").unwrap();
        assert_eq!(
            out,
            r#"<div id="news-feed"><div class="card">a</div>X</div><div>tail</div>"#
        );
    }

    #[test]
    fn splice_accepts_single_quoted_ids() {
        let doc = "<div id='history-container' class='news-grid'></div>";
        let out = splice_into_container(doc, "history-container", "<article/>").unwrap();
        assert_eq!(
            out,
            "<div id='history-container' class='news-grid'><article/></div>"
        );
    }

    #[test]
    fn splice_missing_container_errors() {
        let err = splice_into_container("<div id=\"other\"></div>", "news-feed", "x").unwrap_err();
        assert!(matches!(err, SinkError::TargetMissing(id) if id == "news-feed"));
    }

    #[test]
    fn splice_unclosed_container_errors() {
        let err = splice_into_container("<div id=\"news-feed\">", "news-feed", "x").unwrap_err();
        assert!(matches!(err, SinkError::TargetMissing(_)));
    }

    #[tokio::test]
    async fn buffer_sink_appends_in_order() {
        let sink = BufferSink::new().with_container("news-feed", "");
        sink.append("news-feed", "<div>1</div>").await.unwrap();
        sink.append("news-feed", "<div>2</div>").await.unwrap();
        assert_eq!(
            sink.content_of("news-feed").unwrap(),
            "<div>1</div><div>2</div>"
        );
    }

    #[tokio::test]
    async fn document_sink_round_trips_file() {
        let path = std::env::temp_dir().join("svoinews-sink-test.html");
        tokio::fs::write(&path, "<body><div id=\"news-feed\"></div></body>")
            .await
            .unwrap();

        let sink = DocumentSink::new(&path);
        sink.append("news-feed", "<p>hi</p>").await.unwrap();

        let doc = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(doc, "<body><div id=\"news-feed\"><p>hi</p></div></body>");
    }
}
