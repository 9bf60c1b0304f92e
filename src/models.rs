use crate::types::GitHubRepo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reduced view of a GitHub repository, as returned by `/api/github`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub topics: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
}

impl From<GitHubRepo> for RepositorySummary {
    fn from(repo: GitHubRepo) -> Self {
        Self {
            id: repo.id,
            name: repo.name,
            description: repo.description,
            html_url: repo.html_url,
            homepage: repo.homepage,
            language: repo.language,
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
            topics: repo.topics,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            pushed_at: repo.pushed_at,
        }
    }
}

/// A single scholarly record. Every field is display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    pub authors: String,
    pub venue: String,
    pub year: String,
    pub citations: String,
    pub link: String,
}

/// Author-level citation metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationStats {
    pub total_citations: String,
    pub h_index: String,
    pub i10_index: String,
}

impl Default for CitationStats {
    fn default() -> Self {
        Self {
            total_citations: "0".to_string(),
            h_index: "0".to_string(),
            i10_index: "0".to_string(),
        }
    }
}

/// Body of a successful `/api/scholar` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicationReport {
    pub publications: Vec<Publication>,
    pub stats: CitationStats,
}

/// Body of a degraded `/api/github` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegradedRepositories {
    pub error: String,
    pub details: String,
    pub repos: Vec<RepositorySummary>,
}

/// Body of any non-success response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            note: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
