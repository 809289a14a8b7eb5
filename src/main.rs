// octodash entry point.
// Serves the static dashboard and the aggregated GitHub profile API.

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod cache;
mod config;
mod error;
mod github;
mod profile;
mod server;

use config::Config;
use github::GitHubClient;
use server::AppState;

#[tokio::main]
async fn main() -> error::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    if config.github_token.is_none() {
        info!("GITHUB_TOKEN not set, using unauthenticated GitHub requests");
    }

    let client = GitHubClient::new(github::GITHUB_API_BASE, config.github_token.as_deref())?;
    let state = AppState::new(client, config.cache_ttl);
    let app = server::router(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
