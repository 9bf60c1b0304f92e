use crate::config::AppConfig;
use crate::error::{PortfolioError, Result};
use crate::models::RepositorySummary;
use crate::types::GitHubRepo;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

const PER_PAGE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(base_url: Url, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(GitHubClient { client, base_url, token })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.github_api_url.clone(),
            config.github_token.clone(),
            config.github_timeout,
        )
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn user_repos_url(&self, username: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PortfolioError::ConfigError(format!("Cannot use {} as a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(&["users", username, "repos"]);
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", &PER_PAGE.to_string());
        Ok(url)
    }

    async fn make_request(&self, url: Url) -> Result<Response> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json");

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        Err(PortfolioError::UpstreamFailure(format!(
            "Request failed with status code {}: {}",
            status.as_u16(),
            error_text
        )))
    }

    /// Fetch the raw repository listing for a user, most recently updated first
    pub async fn list_user_repositories(&self, username: &str) -> Result<Vec<GitHubRepo>> {
        let url = self.user_repos_url(username)?;
        debug!("Fetching repositories from {}", url);

        let response = self.make_request(url).await?;
        let repos: Vec<GitHubRepo> = response.json().await?;
        Ok(repos)
    }

    /// Fetch a user's own repositories, reduced and ordered by popularity
    pub async fn fetch_repository_summaries(&self, username: &str) -> Result<Vec<RepositorySummary>> {
        let repos = self.list_user_repositories(username).await?;
        Ok(summarize_repositories(repos))
    }
}

/// Drop forks, project the display fields, and order by stars descending.
/// The sort is stable, so equally starred repositories keep upstream order.
pub fn summarize_repositories(repos: Vec<GitHubRepo>) -> Vec<RepositorySummary> {
    let mut summaries: Vec<RepositorySummary> = repos
        .into_iter()
        .filter(|repo| !repo.fork)
        .map(RepositorySummary::from)
        .collect();

    summaries.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    summaries
}
