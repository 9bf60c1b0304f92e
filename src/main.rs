use clap::Parser;
use colored::*;
use portfolio_api::api::{create_router, AppState};
use portfolio_api::cli::{Cli, ScholarStrategy};
use portfolio_api::config::AppConfig;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli)?;
    debug!("Loaded configuration: {:?}", config);

    println!("{}", "Portfolio API Server".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    if config.github_token.is_none() {
        println!("{}", "GITHUB_TOKEN not set, using unauthenticated GitHub rate limits".yellow());
    }
    if config.serpapi_key.is_none() && config.scholar_strategy != ScholarStrategy::Profile {
        println!("{}", "SERPAPI_KEY not set, SerpAPI publication lookups will fail".yellow());
    }

    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    println!("✅ Scholar strategy: {}", config.scholar_strategy.as_str());
    println!("📡 Listening on http://{}", config.bind_addr);
    println!("\nPress Ctrl+C to stop the server\n");
    info!("Portfolio API listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            println!("\n🛑 Shutting down server...");
        })
        .await?;

    println!("✅ Server stopped");

    Ok(())
}
