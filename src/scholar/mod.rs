//! Publication acquisition strategies.
//!
//! Every strategy answers the same question (an author's publications and
//! citation metrics) from a different upstream. The HTTP handler only sees
//! the [`PublicationSource`] trait; which implementation runs is decided once
//! from configuration.

pub mod profile;
pub mod serpapi;

use crate::cli::ScholarStrategy;
use crate::config::AppConfig;
use crate::error::Result;
use crate::models::PublicationReport;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;
use url::Url;

pub use profile::ProfilePageSource;
pub use serpapi::SerpApiSource;

#[async_trait]
pub trait PublicationSource: Send + Sync {
    /// Short identifier used in logs and health output
    fn name(&self) -> &'static str;

    /// Hint attached to error responses when this source fails
    fn failure_note(&self) -> &'static str;

    async fn fetch_publications(&self, author_id: &str) -> Result<PublicationReport>;
}

/// Tries `primary`, and on any error tries `fallback` instead.
pub struct FallbackSource {
    primary: Arc<dyn PublicationSource>,
    fallback: Arc<dyn PublicationSource>,
}

impl FallbackSource {
    pub fn new(primary: Arc<dyn PublicationSource>, fallback: Arc<dyn PublicationSource>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl PublicationSource for FallbackSource {
    fn name(&self) -> &'static str {
        "serpapi-with-fallback"
    }

    fn failure_note(&self) -> &'static str {
        self.fallback.failure_note()
    }

    async fn fetch_publications(&self, author_id: &str) -> Result<PublicationReport> {
        match self.primary.fetch_publications(author_id).await {
            Ok(report) => Ok(report),
            Err(e) => {
                warn!(
                    "{} failed for {}: {}. Falling back to {}",
                    self.primary.name(),
                    author_id,
                    e,
                    self.fallback.name()
                );
                self.fallback.fetch_publications(author_id).await
            }
        }
    }
}

/// Build the configured strategy
pub fn build_source(config: &AppConfig) -> Result<Arc<dyn PublicationSource>> {
    let source: Arc<dyn PublicationSource> = match config.scholar_strategy {
        ScholarStrategy::Serpapi => Arc::new(SerpApiSource::from_config(config)?),
        ScholarStrategy::Profile => Arc::new(ProfilePageSource::from_config(config)?),
        ScholarStrategy::SerpapiWithFallback => Arc::new(FallbackSource::new(
            Arc::new(SerpApiSource::from_config(config)?),
            Arc::new(ProfilePageSource::from_config(config)?),
        )),
    };
    Ok(source)
}

/// Public profile page of an author, used when an upstream record has no link
pub fn profile_url(scholar_url: &Url, author_id: &str) -> String {
    let mut url = scholar_url.clone();
    url.set_path("/citations");
    url.set_query(None);
    url.query_pairs_mut().append_pair("user", author_id);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortfolioError;
    use crate::models::{CitationStats, Publication};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticSource {
        result: fn() -> Result<PublicationReport>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PublicationSource for StaticSource {
        fn name(&self) -> &'static str {
            "static"
        }

        fn failure_note(&self) -> &'static str {
            "static note"
        }

        async fn fetch_publications(&self, _author_id: &str) -> Result<PublicationReport> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn one_publication() -> Result<PublicationReport> {
        Ok(PublicationReport {
            publications: vec![Publication {
                title: "Fallback".to_string(),
                authors: "A Author".to_string(),
                venue: String::new(),
                year: "2024".to_string(),
                citations: "1".to_string(),
                link: "https://scholar.google.com/citations?user=ABC123".to_string(),
            }],
            stats: CitationStats::default(),
        })
    }

    fn failing() -> Result<PublicationReport> {
        Err(PortfolioError::UpstreamFailure("boom".to_string()))
    }

    #[tokio::test]
    async fn test_fallback_used_when_primary_fails() {
        let primary = Arc::new(StaticSource { result: failing, calls: AtomicUsize::new(0) });
        let fallback = Arc::new(StaticSource { result: one_publication, calls: AtomicUsize::new(0) });
        let source = FallbackSource::new(primary.clone(), fallback.clone());

        let report = source.fetch_publications("ABC123").await.unwrap();

        assert_eq!(report.publications[0].title, "Fallback");
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fallback_skipped_when_primary_succeeds() {
        let primary = Arc::new(StaticSource { result: one_publication, calls: AtomicUsize::new(0) });
        let fallback = Arc::new(StaticSource { result: failing, calls: AtomicUsize::new(0) });
        let source = FallbackSource::new(primary, fallback.clone());

        assert!(source.fetch_publications("ABC123").await.is_ok());
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_profile_url() {
        let base = Url::parse("https://scholar.google.com").unwrap();
        assert_eq!(profile_url(&base, "ABC123"), "https://scholar.google.com/citations?user=ABC123");
    }
}
