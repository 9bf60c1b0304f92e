use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "portfolio-api")]
#[command(about = "Portfolio API Server - Serves GitHub repositories and Google Scholar publications")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: String,

    /// GitHub access token (optional, raises rate limits)
    #[arg(long, env = "GITHUB_TOKEN")]
    pub github_token: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub github_api_url: String,

    /// Timeout for the repository listing call, in seconds
    #[arg(long, env = "GITHUB_TIMEOUT_SECS", default_value_t = 10)]
    pub github_timeout_secs: u64,

    /// SerpAPI key for the Google Scholar author engine
    #[arg(long, env = "SERPAPI_KEY")]
    pub serpapi_key: Option<String>,

    /// SerpAPI search endpoint
    #[arg(long, env = "SERPAPI_URL", default_value = "https://serpapi.com/search.json")]
    pub serpapi_url: String,

    /// Google Scholar base URL
    #[arg(long, env = "SCHOLAR_URL", default_value = "https://scholar.google.com")]
    pub scholar_url: String,

    /// How publications are acquired
    #[arg(long, env = "SCHOLAR_STRATEGY", value_enum, default_value_t = ScholarStrategy::Serpapi)]
    pub scholar_strategy: ScholarStrategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScholarStrategy {
    /// SerpAPI structured search
    Serpapi,
    /// Scrape the public author profile page
    Profile,
    /// SerpAPI first, profile page when it fails
    SerpapiWithFallback,
}

impl ScholarStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScholarStrategy::Serpapi => "serpapi",
            ScholarStrategy::Profile => "profile",
            ScholarStrategy::SerpapiWithFallback => "serpapi-with-fallback",
        }
    }
}
