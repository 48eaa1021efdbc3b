// QUOTED: credential-hiding proxy for the quote provider
//
// Browsers and other untrusted clients must never see the provider's API key.
// This daemon holds the key and exposes the two routes clients know about:
//
// - GET /api/v1/quotes                 -> provider list, as-is
//   (what a local development proxy serves)
// - GET /.netlify/functions/get-quote  -> first quote as a single object
//   (what the production serverless function serves)
//
// Both accept an optional `?category=` filter forwarded to the provider.
//
// SETUP:
// 1. Write config.toml (see below) to $QUOTED_CONFIG or
//    $XDG_CONFIG_DIRS/quoted/config.toml. Without a file, defaults are used.
//
//    [upstream]
//    endpoint = "https://api.api-ninjas.com/v1/quotes"
//    api_key = "..."        # or export API_NINJAS_KEY
//    timeout = 30
//
//    [proxy]
//    host = "127.0.0.1"
//    port = 8080
//
// 2. Build and run:
//    $ cargo run --release -p quoted
//
// 3. Point the `quote` CLI (or any UI) at http://127.0.0.1:8080.

mod config;
mod provider;
mod proxy;
mod state;

use std::{env, sync::Arc};
use tracing::info;

use crate::{
    config::{Config, API_KEY_ENV, CONFIG_ENV},
    provider::{api_ninjas::ApiNinjasProvider, common::create_client},
    proxy::router,
    state::AppState,
};

/// Load configuration from the explicit path, or the XDG default
fn load_config() -> Result<Config, config::ConfigError> {
    config::load(
        env::var(CONFIG_ENV).ok(),
        env::var("XDG_CONFIG_DIRS").ok(),
        env::var(API_KEY_ENV).ok(),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}

/// Main entry point for the proxy server
#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quoted=debug,tower_http=debug".into()),
        )
        .init();

    let config = load_config().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    info!("Starting proxy server on {}:{}", config.proxy.host, config.proxy.port);
    info!("Forwarding requests to: {}", config.upstream.endpoint);

    let client = create_client(&config).unwrap_or_else(|e| {
        eprintln!("Failed to create HTTP client: {}", e);
        std::process::exit(1);
    });

    let state = AppState {
        config: Arc::new(config.clone()),
        client,
        provider: Arc::new(ApiNinjasProvider::new()),
    };

    let app = router(state);

    // Bind and serve
    let addr = format!("{}:{}", config.proxy.host, config.proxy.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        });

    info!("Proxy server listening on {}", addr);
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
