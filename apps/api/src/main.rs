mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing GOOGLE_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentLens API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM gateway with fixed generation and safety settings
    let generation = config.generation_config();
    let safety = config.safety_policy();
    info!(
        "LLM client initialized (model: {}, temperature: {}, max_output_tokens: {})",
        llm_client::MODEL,
        generation.temperature,
        generation.max_output_tokens
    );
    info!("Safety threshold: {:?}", config.safety_threshold);
    for (category, threshold) in &config.safety_overrides {
        info!("Safety threshold override: {category:?} = {threshold:?}");
    }
    let gateway = GeminiClient::new(config.google_api_key.clone(), generation, safety)?;

    let state = AppState {
        gateway: Arc::new(gateway),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the front-end host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
