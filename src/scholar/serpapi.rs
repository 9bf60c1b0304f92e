//! Google Scholar author data through SerpAPI's `google_scholar_author` engine.

use super::{profile_url, PublicationSource};
use crate::config::AppConfig;
use crate::error::{PortfolioError, Result};
use crate::models::{CitationStats, Publication, PublicationReport};
use crate::types::{SerpApiArticle, SerpApiAuthorResponse, SerpApiErrorBody};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

const ENGINE: &str = "google_scholar_author";
const MAX_PUBLICATIONS: u32 = 5;

pub struct SerpApiSource {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    scholar_url: Url,
}

impl SerpApiSource {
    pub fn new(endpoint: Url, api_key: Option<String>, scholar_url: Url) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            scholar_url,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.serpapi_url.clone(),
            config.serpapi_key.clone(),
            config.scholar_url.clone(),
        )
    }
}

#[async_trait]
impl PublicationSource for SerpApiSource {
    fn name(&self) -> &'static str {
        "serpapi"
    }

    fn failure_note(&self) -> &'static str {
        "Check your SerpAPI key and quota. Free tier: 100 searches/month."
    }

    async fn fetch_publications(&self, author_id: &str) -> Result<PublicationReport> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PortfolioError::ConfigurationMissing("SerpAPI key not configured".to_string()))?;

        debug!("Querying SerpAPI for author {}", author_id);

        let num = MAX_PUBLICATIONS.to_string();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("engine", ENGINE),
                ("author_id", author_id),
                ("api_key", api_key),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer SerpAPI's own explanation over the bare status line.
            let details = serde_json::from_str::<SerpApiErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("Request failed with status code {}", status.as_u16()));
            return Err(PortfolioError::UpstreamFailure(details));
        }

        let data: SerpApiAuthorResponse = response.json().await?;
        if let Some(error) = &data.error {
            warn!("SerpAPI reported an error for {}: {}", author_id, error);
        }

        Ok(build_report(data, &self.scholar_url, author_id))
    }
}

pub fn build_report(data: SerpApiAuthorResponse, scholar_url: &Url, author_id: &str) -> PublicationReport {
    let fallback_link = profile_url(scholar_url, author_id);

    let stats = data
        .cited_by
        .as_ref()
        .map(|cited_by| CitationStats {
            total_citations: table_metric(&cited_by.table, 0, "citations"),
            h_index: table_metric(&cited_by.table, 1, "h_index"),
            i10_index: table_metric(&cited_by.table, 2, "i10_index"),
        })
        .unwrap_or_default();

    let publications = data
        .articles
        .into_iter()
        .map(|article| map_article(article, &fallback_link))
        .collect();

    PublicationReport { publications, stats }
}

fn map_article(article: SerpApiArticle, fallback_link: &str) -> Publication {
    Publication {
        title: article.title.unwrap_or_default(),
        authors: article.authors.unwrap_or_default(),
        venue: article.publication.unwrap_or_default(),
        year: article.year.as_ref().and_then(value_to_string).unwrap_or_default(),
        citations: article
            .cited_by
            .and_then(|c| c.value)
            .as_ref()
            .and_then(value_to_string)
            .unwrap_or_else(|| "0".to_string()),
        link: article
            .link
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| fallback_link.to_string()),
    }
}

/// `table[row][key]["all"]`, stringified, or "0".
fn table_metric(table: &[Value], row: usize, key: &str) -> String {
    table
        .get(row)
        .and_then(|r| r.get(key))
        .and_then(|m| m.get("all"))
        .and_then(value_to_string)
        .unwrap_or_else(|| "0".to_string())
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
