//! Process-wide configuration, read once at startup.

use crate::cli::{Cli, ScholarStrategy};
use crate::error::{PortfolioError, Result};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com/search.json";
pub const DEFAULT_SCHOLAR_URL: &str = "https://scholar.google.com";
pub const DEFAULT_GITHUB_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub github_token: Option<String>,
    pub github_api_url: Url,
    pub github_timeout: Duration,
    pub serpapi_key: Option<String>,
    pub serpapi_url: Url,
    pub scholar_url: Url,
    pub scholar_strategy: ScholarStrategy,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let bind_addr = cli
            .bind
            .parse()
            .map_err(|e| PortfolioError::ConfigError(format!("Invalid bind address {}: {}", cli.bind, e)))?;

        Ok(AppConfig {
            bind_addr,
            github_token: non_empty(cli.github_token.as_deref()),
            github_api_url: parse_url("github-api-url", &cli.github_api_url)?,
            github_timeout: Duration::from_secs(cli.github_timeout_secs),
            serpapi_key: non_empty(cli.serpapi_key.as_deref()),
            serpapi_url: parse_url("serpapi-url", &cli.serpapi_url)?,
            scholar_url: parse_url("scholar-url", &cli.scholar_url)?,
            scholar_strategy: cli.scholar_strategy,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            github_token: None,
            github_api_url: Url::parse(DEFAULT_GITHUB_API_URL).expect("valid default URL"),
            github_timeout: DEFAULT_GITHUB_TIMEOUT,
            serpapi_key: None,
            serpapi_url: Url::parse(DEFAULT_SERPAPI_URL).expect("valid default URL"),
            scholar_url: Url::parse(DEFAULT_SCHOLAR_URL).expect("valid default URL"),
            scholar_strategy: ScholarStrategy::Serpapi,
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("github_api_url", &self.github_api_url.as_str())
            .field("github_timeout", &self.github_timeout)
            .field("serpapi_key", &self.serpapi_key.as_ref().map(|_| "<redacted>"))
            .field("serpapi_url", &self.serpapi_url.as_str())
            .field("scholar_url", &self.scholar_url.as_str())
            .field("scholar_strategy", &self.scholar_strategy)
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn parse_url(name: &str, value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| PortfolioError::ConfigError(format!("Invalid {} {}: {}", name, value, e)))
}
