//! The feed loader itself
//!
//! Pulls a fragment resource into a page container through two injected
//! capabilities. The behavior is fixed: fetch once, append once, log and
//! swallow on failure.

use std::sync::Arc;

use crate::error::LoadError;
use crate::fetch::ResourceFetcher;
use crate::sink::ContentSink;

/// Diagnostic emitted when a load pass fails.
const LOAD_FAILURE_MESSAGE: &str = "failed to load news feed";

/// One-shot loader splicing a fragment resource into a page container
pub struct FeedLoader<F, S>
where
    F: ResourceFetcher,
    S: ContentSink,
{
    fetcher: Arc<F>,
    sink: Arc<S>,
    resource: String,
    target: String,
}

impl<F, S> FeedLoader<F, S>
where
    F: ResourceFetcher,
    S: ContentSink,
{
    pub fn new(fetcher: Arc<F>, sink: Arc<S>, resource: &str, target: &str) -> Self {
        Self {
            fetcher,
            sink,
            resource: resource.to_string(),
            target: target.to_string(),
        }
    }

    /// One load pass: fetch the fragment, append it to the container.
    ///
    /// Not idempotent by design: calling this twice appends the fragment
    /// twice.
    pub async fn load(&self) -> Result<(), LoadError> {
        let fragment = self.fetcher.fetch_text(&self.resource).await?;
        self.sink.append(&self.target, &fragment).await?;
        tracing::debug!(
            resource = %self.resource,
            target = %self.target,
            bytes = fragment.len(),
            "feed fragment inserted"
        );
        Ok(())
    }

    /// Initialization hook for the host startup sequence.
    ///
    /// Fire-and-forget: any failure is reported once to the log sink and
    /// swallowed. Nothing is inserted on the failure path.
    pub async fn run(&self) {
        if let Err(e) = self.load().await {
            tracing::error!(error = %e, "{}", LOAD_FAILURE_MESSAGE);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::error::FetchError;
    use crate::sink::BufferSink;
    use async_trait::async_trait;

    /// Shared buffer standing in for the log sink
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLog {
        type Writer = CapturedLog;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    struct StaticFetcher(String);

    #[async_trait]
    impl ResourceFetcher for StaticFetcher {
        async fn fetch_text(&self, _path: &str) -> Result<String, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl ResourceFetcher for FailingFetcher {
        async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
            Err(FetchError::Io {
                path: path.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
            })
        }
    }

    fn loader<F: ResourceFetcher>(
        fetcher: F,
        sink: Arc<BufferSink>,
    ) -> FeedLoader<F, BufferSink> {
        FeedLoader::new(Arc::new(fetcher), sink, "news.html", "news-feed")
    }

    #[tokio::test]
    async fn load_appends_without_clearing() {
        let sink = Arc::new(BufferSink::new().with_container("news-feed", "<p>kept</p>"));
        let loader = loader(StaticFetcher("<div>Hello</div>".into()), sink.clone());

        loader.load().await.unwrap();

        assert_eq!(
            sink.content_of("news-feed").unwrap(),
            "<p>kept</p><div>Hello</div>"
        );
    }

    #[tokio::test]
    async fn load_into_empty_container_matches_fragment() {
        let sink = Arc::new(BufferSink::new().with_container("news-feed", ""));
        let loader = loader(StaticFetcher("<div>Hello</div>".into()), sink.clone());

        loader.load().await.unwrap();

        assert_eq!(sink.content_of("news-feed").unwrap(), "<div>Hello</div>");
    }

    #[tokio::test]
    async fn double_invocation_appends_twice_in_order() {
        let sink = Arc::new(BufferSink::new().with_container("news-feed", ""));
        let loader = loader(StaticFetcher("<div>T</div>".into()), sink.clone());

        loader.run().await;
        loader.run().await;

        assert_eq!(
            sink.content_of("news-feed").unwrap(),
            "<div>T</div><div>T</div>"
        );
    }

    #[tokio::test]
    async fn fetch_failure_leaves_container_unchanged() {
        let sink = Arc::new(BufferSink::new().with_container("news-feed", "<p>kept</p>"));
        let loader = loader(FailingFetcher, sink.clone());

        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, LoadError::Fetch(_)));
        assert_eq!(sink.content_of("news-feed").unwrap(), "<p>kept</p>");
    }

    #[tokio::test]
    async fn run_swallows_fetch_failure() {
        let sink = Arc::new(BufferSink::new().with_container("news-feed", ""));
        let loader = loader(FailingFetcher, sink.clone());

        // Must not panic or propagate.
        loader.run().await;
        assert_eq!(sink.content_of("news-feed").unwrap(), "");
    }

    #[tokio::test]
    async fn run_reports_the_failure_exactly_once() {
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(log.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let sink = Arc::new(BufferSink::new().with_container("news-feed", ""));
        loader(FailingFetcher, sink).run().await;

        assert_eq!(log.contents().matches(LOAD_FAILURE_MESSAGE).count(), 1);
    }

    #[tokio::test]
    async fn run_swallows_missing_container() {
        let sink = Arc::new(BufferSink::new());
        let loader = loader(StaticFetcher("<div>T</div>".into()), sink.clone());

        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, LoadError::Sink(_)));

        loader.run().await;
        assert!(sink.content_of("news-feed").is_none());
    }
}
