use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(String),

    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    #[error("Parse failure: {0}")]
    ParseFailure(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PortfolioError {
    /// HTTP status a handler reports when it surfaces this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PortfolioError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, PortfolioError::UpstreamTimeout(_))
    }

    /// The bare message, without the variant prefix.
    pub fn details(&self) -> String {
        match self {
            PortfolioError::MissingParameter(msg)
            | PortfolioError::ConfigurationMissing(msg)
            | PortfolioError::UpstreamTimeout(msg)
            | PortfolioError::UpstreamFailure(msg)
            | PortfolioError::ParseFailure(msg)
            | PortfolioError::ConfigError(msg) => msg.clone(),
        }
    }
}

impl From<reqwest::Error> for PortfolioError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PortfolioError::UpstreamTimeout(err.to_string())
        } else if err.is_decode() {
            PortfolioError::ParseFailure(err.to_string())
        } else {
            PortfolioError::UpstreamFailure(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
