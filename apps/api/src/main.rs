mod budget;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;
mod tools;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GroqClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerKit API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    if !config.ai_configured() {
        warn!("GROQ_API_KEY is not set; AI tools will respond with 'AI service not configured'");
    }
    let llm = GroqClient::new(config.groq_api_url.clone(), config.groq_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::LARGE_MODEL);

    let state = AppState::new(Arc::new(llm), config.clone());
    info!(
        "Budget tier: {:?} ({} chars/token, paired input budget {} tokens)",
        config.budget_tier,
        state.budget.chars_per_token(),
        state.limits.paired_input_tokens
    );

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict CORS origins to the deployed frontend
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
