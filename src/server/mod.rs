//! HTTP server for inference
//!
//! Provides OpenAI-compatible REST API.

mod handlers;
mod routes;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::pipeline::Pipeline;

pub use handlers::AppState;
pub use routes::api_routes;

/// Build the application router
pub fn app(pipeline: Arc<Pipeline>, config: &ServerConfig) -> Router {
    let state = Arc::new(AppState::new(pipeline, config.debug));

    let mut app = Router::new().merge(api_routes());
    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Start the HTTP inference server
pub async fn start(pipeline: Arc<Pipeline>, config: ServerConfig) -> Result<()> {
    let app = app(pipeline, &config);

    let addr = config.addr();
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API endpoints:");
    tracing::info!("  GET  /health - Health check");
    tracing::info!("  GET  /v1/models - List models");
    tracing::info!("  POST /v1/completions - Text completion");
    tracing::info!("  POST /v1/chat/completions - Chat completion");

    axum::serve(listener, app).await?;

    Ok(())
}
