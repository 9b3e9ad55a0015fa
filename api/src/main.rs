//! TalentScout API Server
//!
//! Discovers candidate profiles on GitHub: turns a structured search request
//! into repository searches, collects the owners' profiles under GitHub's rate
//! limits, and returns scored, normalized candidate records.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{GitHubFetcher, ReqwestTransport, RetryPolicy, SystemClock};
use app::{CandidateSearchService, SearchSettings};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub search_service: Arc<CandidateSearchService<GitHubFetcher>>,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    github_authenticated: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        github_authenticated: state.config.github_authenticated(),
    })
}

/// Build the application router. `search_routes` comes in separately so the
/// server can rate-limit it while tests drive it directly.
pub fn router(state: AppState, search_routes: Router<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(search_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wire the GitHub fetcher and search service from configuration
pub fn build_state(config: Config, fetcher: GitHubFetcher) -> AppState {
    let search_service = Arc::new(CandidateSearchService::new(
        Arc::new(fetcher),
        SearchSettings::from_config(&config),
    ));

    AppState {
        search_service,
        config,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,talentscout_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting TalentScout API...");

    // Load configuration
    let config = Config::from_env();
    if !config.github_authenticated() {
        tracing::warn!("GITHUB_TOKEN not set; GitHub allows far fewer unauthenticated calls");
    }

    // Create adapters
    let transport = ReqwestTransport::new(config.github_token.as_deref(), config.github_timeout())
        .context("Failed to build GitHub HTTP client")?;

    let fetcher = GitHubFetcher::new(
        config.github_api_url.clone(),
        Arc::new(transport),
        Arc::new(SystemClock),
        RetryPolicy {
            max_retries: config.github_max_retries,
            initial_delay: config.initial_backoff(),
        },
    );

    let port = config.port;
    let state = build_state(config, fetcher);

    // Rate limiting config: 1 search/sec sustained, burst of 3.
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(1)
            .burst_size(3)
            .finish()
            .context("Failed to build governor config")?,
    );

    let search_routes = handlers::search_routes().layer(GovernorLayer {
        config: governor_config,
    });

    let app = router(state, search_routes);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
