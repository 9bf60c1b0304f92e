use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

// GitHub API response structures
#[derive(Debug, Deserialize)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub fork: bool,
    pub stargazers_count: u32,
    pub forks_count: u32,
    #[serde(default)]
    pub topics: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
}

// SerpAPI `google_scholar_author` engine response structures
#[derive(Debug, Default, Deserialize)]
pub struct SerpApiAuthorResponse {
    #[serde(default)]
    pub articles: Vec<SerpApiArticle>,
    pub cited_by: Option<SerpApiCitedBy>,
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SerpApiArticle {
    pub title: Option<String>,
    pub link: Option<String>,
    pub authors: Option<String>,
    pub publication: Option<String>,
    pub cited_by: Option<SerpApiArticleCitations>,
    /// Usually a string, occasionally a bare number.
    pub year: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SerpApiArticleCitations {
    pub value: Option<Value>,
}

/// Rows are heterogeneous: `{"citations": {...}}`, `{"h_index": {...}}`,
/// `{"i10_index": {...}}`, in that order.
#[derive(Debug, Default, Deserialize)]
pub struct SerpApiCitedBy {
    #[serde(default)]
    pub table: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct SerpApiErrorBody {
    pub error: String,
}
