mod common;

use axum::http::StatusCode;
use common::*;
use portfolio_api::cli::ScholarStrategy;

#[tokio::test]
async fn test_liveness() {
    let (status, body) = get_json(&config_for("http://127.0.0.1:9"), "/livez").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_health_degraded_without_serpapi_key() {
    let (status, body) = get_json(&config_for("http://127.0.0.1:9"), "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["scholar_strategy"], "serpapi");
    assert_eq!(body["serpapi_key_configured"], false);
    assert_eq!(body["github_token_configured"], false);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_profile_strategy() {
    let config = with_strategy(config_for("http://127.0.0.1:9"), ScholarStrategy::Profile);
    let (status, body) = get_json(&config, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["scholar_strategy"], "profile");
}
