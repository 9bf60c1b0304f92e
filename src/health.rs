use crate::api::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

/// Health check status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub scholar_strategy: String,
    pub github_token_configured: bool,
    pub serpapi_key_configured: bool,
}

/// Liveness probe response (minimal, just indicates the process is running)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

pub fn create_health_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check)) // Kubernetes convention
        .route("/livez", get(liveness_check))
}

/// Reports configuration only. Upstreams are never contacted from here.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let strategy = state.publications.name();

    // SerpAPI without a key can only ever answer with an error.
    let status = if strategy == "serpapi" && !state.serpapi_key_configured {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        scholar_strategy: strategy.to_string(),
        github_token_configured: state.github.has_token(),
        serpapi_key_configured: state.serpapi_key_configured,
    };

    // Still 200 for degraded
    (StatusCode::OK, Json(response))
}

async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}
