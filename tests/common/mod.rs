#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use portfolio_api::api::{create_router, AppState};
use portfolio_api::cli::ScholarStrategy;
use portfolio_api::config::AppConfig;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;
use tower::ServiceExt;
use url::Url;

/// Configuration with every upstream pointed at `upstream`
pub fn config_for(upstream: &str) -> AppConfig {
    AppConfig {
        github_api_url: Url::parse(upstream).expect("valid mock URL"),
        serpapi_url: Url::parse(&format!("{}/search.json", upstream)).expect("valid mock URL"),
        scholar_url: Url::parse(upstream).expect("valid mock URL"),
        ..Default::default()
    }
}

pub fn with_serpapi_key(mut config: AppConfig, key: &str) -> AppConfig {
    config.serpapi_key = Some(key.to_string());
    config
}

pub fn with_strategy(mut config: AppConfig, strategy: ScholarStrategy) -> AppConfig {
    config.scholar_strategy = strategy;
    config
}

/// Issue a GET against a freshly built router and decode the JSON body
pub async fn get_json(config: &AppConfig, uri: &str) -> (StatusCode, Value) {
    let app = create_router(AppState::from_config(config).expect("Failed to build state"));

    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("Router failed");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).expect("Body is not JSON");

    (status, body)
}

/// A listener that accepts connections and never answers
pub async fn silent_upstream() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address nothing is listening on
pub async fn closed_upstream() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn repo_json(id: u64, name: &str, stars: u32, fork: bool) -> Value {
    json!({
        "id": id,
        "node_id": format!("MDEwOlJlcG9zaXRvcnk{}", id),
        "name": name,
        "full_name": format!("octocat/{}", name),
        "private": false,
        "owner": { "login": "octocat", "id": 1 },
        "description": format!("{} description", name),
        "html_url": format!("https://github.com/octocat/{}", name),
        "homepage": null,
        "language": "Rust",
        "fork": fork,
        "stargazers_count": stars,
        "watchers_count": stars,
        "forks_count": 2,
        "topics": ["rust", "cli"],
        "created_at": "2021-01-26T19:01:12Z",
        "updated_at": "2024-03-01T10:00:00Z",
        "pushed_at": "2024-02-28T09:30:00Z"
    })
}

pub const PROFILE_PAGE: &str = r#"
<html><body>
<table id="gsc_rsb_st">
  <tbody>
    <tr><td class="gsc_rsb_sc1">Citations</td><td class="gsc_rsb_std">58</td><td class="gsc_rsb_std">55</td></tr>
    <tr><td class="gsc_rsb_sc1">h-index</td><td class="gsc_rsb_std">4</td><td class="gsc_rsb_std">4</td></tr>
    <tr><td class="gsc_rsb_sc1">i10-index</td><td class="gsc_rsb_std">2</td><td class="gsc_rsb_std">2</td></tr>
  </tbody>
</table>
<table id="gsc_a_t"><tbody id="gsc_a_b">
  <tr class="gsc_a_tr">
    <td class="gsc_a_t"><a href="/citations?view_op=view_citation&amp;citation_for_view=ABC123:one" class="gsc_a_at">Lung Nodule Detection with CNNs</a>
      <div class="gs_gray">A Rahim, C Coauthor</div><div class="gs_gray">Computers in Biology and Medicine</div></td>
    <td class="gsc_a_c"><a class="gsc_a_ac gs_ibl">31</a></td>
    <td class="gsc_a_y"><span class="gsc_a_h gsc_a_hc gs_ibl">2022</span></td>
  </tr>
  <tr class="gsc_a_tr">
    <td class="gsc_a_t"><a class="gsc_a_at">   </a><div class="gs_gray">Nobody</div></td>
    <td class="gsc_a_c"><a class="gsc_a_ac gs_ibl">3</a></td>
    <td class="gsc_a_y"><span class="gsc_a_h gsc_a_hc gs_ibl">2021</span></td>
  </tr>
  <tr class="gsc_a_tr">
    <td class="gsc_a_t"><a href="/citations?view_op=view_citation&amp;citation_for_view=ABC123:two" class="gsc_a_at">Skin Lesion Classification</a>
      <div class="gs_gray">A Rahim</div><div class="gs_gray">arXiv preprint</div></td>
    <td class="gsc_a_c"><a class="gsc_a_ac gs_ibl"></a></td>
    <td class="gsc_a_y"><span class="gsc_a_h gsc_a_hc gs_ibl">2024</span></td>
  </tr>
</tbody></table>
</body></html>
"#;

pub const SHORT_TIMEOUT: Duration = Duration::from_millis(300);
