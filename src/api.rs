use crate::config::AppConfig;
use crate::error::{PortfolioError, Result};
use crate::github::GitHubClient;
use crate::health;
use crate::models::{DegradedRepositories, ErrorResponse};
use crate::scholar::{self, PublicationSource};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Shared, read-only handler state
#[derive(Clone)]
pub struct AppState {
    pub github: Arc<GitHubClient>,
    pub publications: Arc<dyn PublicationSource>,
    pub serpapi_key_configured: bool,
    pub start_time: Instant,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(AppState {
            github: Arc::new(GitHubClient::from_config(config)?),
            publications: scholar::build_source(config)?,
            serpapi_key_configured: config.serpapi_key.is_some(),
            start_time: Instant::now(),
        })
    }
}

/// Create the public API router, including health probes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/github", get(get_repositories))
        .route("/api/scholar", get(get_publications))
        .merge(health::create_health_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// First value of a query parameter; repeats after it are ignored.
fn first_param(params: &[(String, String)], name: &str) -> Option<String> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

fn required(value: Option<String>, message: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| PortfolioError::MissingParameter(message.to_string()))
}

fn error_response(err: PortfolioError) -> Response {
    (err.status_code(), Json(ErrorResponse::new(err.details()))).into_response()
}

/// List a user's non-fork repositories, most starred first.
///
/// Upstream failures never surface as errors: the caller gets a 200 with an
/// empty `repos` list and an explanation instead.
async fn get_repositories(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let username = match required(first_param(&params, "username"), "Username is required") {
        Ok(username) => username,
        Err(e) => return error_response(e),
    };

    match state.github.fetch_repository_summaries(&username).await {
        Ok(repos) => {
            info!("Returning {} repositories for {}", repos.len(), username);
            (StatusCode::OK, Json(repos)).into_response()
        }
        Err(e) => {
            error!("GitHub API error for {}: {}", username, e);
            let body = degraded_repositories(&e);
            warn!("Serving empty repository list for {}", username);
            (StatusCode::OK, Json(body)).into_response()
        }
    }
}

pub fn degraded_repositories(err: &PortfolioError) -> DegradedRepositories {
    if err.is_timeout() {
        DegradedRepositories {
            error: "GitHub API connection timeout".to_string(),
            details: "The GitHub API is temporarily unreachable. Please try again later.".to_string(),
            repos: Vec::new(),
        }
    } else {
        DegradedRepositories {
            error: "Failed to fetch repositories".to_string(),
            details: err.details(),
            repos: Vec::new(),
        }
    }
}

/// Publications and citation metrics for a Google Scholar author.
async fn get_publications(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let scholar_id = match required(first_param(&params, "scholarId"), "Scholar ID is required") {
        Ok(scholar_id) => scholar_id,
        Err(e) => return error_response(e),
    };

    let source = &state.publications;
    match source.fetch_publications(&scholar_id).await {
        Ok(report) => {
            info!(
                "Returning {} publications for {} via {}",
                report.publications.len(),
                scholar_id,
                source.name()
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(PortfolioError::ConfigurationMissing(msg)) => {
            error!("{} unavailable: {}", source.name(), msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(msg).with_note("Please add SERPAPI_KEY to your environment variables")),
            )
                .into_response()
        }
        Err(e) => {
            error!("{} error for {}: {}", source.name(), scholar_id, e);
            (
                e.status_code(),
                Json(
                    ErrorResponse::new("Failed to fetch publications")
                        .with_details(e.details())
                        .with_note(source.failure_note()),
                ),
            )
                .into_response()
        }
    }
}
