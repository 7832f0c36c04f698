mod config;
mod errors;
mod llm_client;
mod models;
mod outreach;
mod page;
mod portfolio;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::outreach::email_composer::SenderPersona;
use crate::page::HttpPageFetcher;
use crate::portfolio::{load_catalog, PortfolioIndex};
use crate::routes::build_router;
use crate::state::AppState;

const PAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Outreach API v{}", env!("CARGO_PKG_VERSION"));

    // Load the portfolio catalog before serving anything
    let rows = load_catalog(Path::new(&config.portfolio_csv)).with_context(|| {
        format!(
            "Failed to load portfolio catalog from {}",
            config.portfolio_csv
        )
    })?;
    let mut portfolio = PortfolioIndex::new(config.portfolio_max_links);
    portfolio.load(rows);
    info!(
        "Portfolio index ready: {} entries, top {} links per job",
        portfolio.len(),
        portfolio.max_links()
    );
    if portfolio.is_empty() {
        warn!("Portfolio catalog is empty; emails will cite no case studies");
    }

    // Initialize text-completion client
    let llm = LlmClient::new(
        config.llm_api_key.clone(),
        &config.llm_base_url,
        config.llm_model.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )
    .context("Failed to build LLM client")?;
    info!("LLM client initialized (model: {})", llm.model());

    let fetcher = HttpPageFetcher::new(PAGE_FETCH_TIMEOUT).context("Failed to build page fetcher")?;

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        fetcher: Arc::new(fetcher),
        portfolio: Arc::new(portfolio),
        persona: SenderPersona {
            sender_name: config.sender_name.clone(),
            agency_name: config.agency_name.clone(),
        },
    };

    // Build router
    let app = build_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
