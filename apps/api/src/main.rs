mod config;
mod errors;
mod llm_client;
mod routes;
mod state;
mod suggestion;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{CompletionClient, OpenAiClient};
use crate::routes::build_router;
use crate::state::AppState;
use crate::suggestion::resolver::SuggestionResolver;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Remedia API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the LLM client only when a credential is configured.
    // Absence is not an error: the resolver answers from the rule table.
    let llm: Option<Arc<dyn CompletionClient>> = match &config.openai_api_key {
        Some(key) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(OpenAiClient::new(
                key.clone(),
                config.llm_timeout_secs,
            )))
        }
        None => {
            info!("OPENAI_API_KEY not set, running with rule-based fallback only");
            None
        }
    };

    // Build the resolver with the configured upstream-failure policy
    let resolver = Arc::new(SuggestionResolver::new(llm, config.on_upstream_failure));
    info!(
        "Suggestion resolver initialized (on_upstream_failure: {:?})",
        config.on_upstream_failure
    );

    // Build app state
    let state = AppState { resolver };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
