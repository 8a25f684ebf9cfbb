use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prompt_builder::config::Config;
use prompt_builder::gateway::ClaudeImageAnalyzer;
use prompt_builder::llm_client::{self, LlmClient};
use prompt_builder::routes::build_router;
use prompt_builder::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "prompt_builder={level},tower_http={level}",
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Prompt Builder API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize vision backend (disabled without ANTHROPIC_API_KEY)
    let llm = match config.anthropic_api_key.clone() {
        Some(key) => {
            let llm = LlmClient::with_endpoint(key, config.anthropic_api_url.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(llm)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; image analysis will answer 500");
            None
        }
    };

    let state = AppState {
        config: config.clone(),
        analyzer: Arc::new(ClaudeImageAnalyzer::new(llm)),
    };

    let app = build_router(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
