mod chat;
mod config;
mod errors;
mod generation;
mod llm_client;
mod markdown;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::session::GeminiChatBackend;
use crate::config::Config;
use crate::generation::generator::GeminiAssetGenerator;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RecruitAI API v{}", env!("CARGO_PKG_VERSION"));

    if config.api_key.is_empty() {
        // Not fatal: the model endpoint rejects the calls instead.
        tracing::warn!("API_KEY is not set; model calls will be sent without a credential");
    }

    // One client shared by generation and chat
    let llm = LlmClient::with_base_url(config.api_key.clone(), &config.api_base);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState::new(
        Arc::new(GeminiAssetGenerator::new(llm.clone())),
        Arc::new(GeminiChatBackend::new(llm)),
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict to the page origin once it is served from a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
