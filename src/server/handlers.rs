//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::Error;
use crate::openai::{ErrorDetail, ErrorResponse, OpenAIRequest};
use crate::pipeline::{Mode, Pipeline};

/// Shared application state
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    /// Log request and response bodies
    pub debug: bool,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>, debug: bool) -> Self {
        Self { pipeline, debug }
    }
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// List available models
pub async fn list_models(State(state): State<Arc<AppState>>) -> Response {
    let pipeline = Arc::clone(&state.pipeline);
    match run_blocking(move || pipeline.list_models()).await {
        Ok(models) => (StatusCode::OK, Json(models)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Text completion endpoint
pub async fn completions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<OpenAIRequest>,
) -> Response {
    serve(state, Mode::Completion, &headers, request).await
}

/// Chat completion endpoint
pub async fn chat_completions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<OpenAIRequest>,
) -> Response {
    serve(state, Mode::Chat, &headers, request).await
}

async fn serve(
    state: Arc<AppState>,
    mode: Mode,
    headers: &HeaderMap,
    request: OpenAIRequest,
) -> Response {
    if state.debug {
        let received = serde_json::to_string(&request).unwrap_or_default();
        tracing::debug!("Request received: {}", received);
    }

    let bearer = bearer_token(headers);
    let pipeline = Arc::clone(&state.pipeline);
    let result = run_blocking(move || pipeline.run(mode, &request, bearer.as_deref())).await;

    match result {
        Ok(response) => {
            if state.debug {
                let sent = serde_json::to_string(&response.choices).unwrap_or_default();
                tracing::debug!("Response: {}", sent);
            }
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::warn!("Request failed: {}", e);
            error_response(&e)
        }
    }
}

/// Model selector carried in `Authorization: Bearer <model>`
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.strip_prefix("Bearer ").unwrap_or(v).trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Run pipeline work off the async executor
async fn run_blocking<T, F>(work: F) -> Result<T, Error>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, Error> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::Task(e.to_string()))?
}

fn error_response(err: &Error) -> Response {
    let (status, kind) = match err {
        Error::NoModel => (StatusCode::BAD_REQUEST, "invalid_request_error"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "server_error"),
    };
    (
        status,
        Json(ErrorResponse {
            error: ErrorDetail {
                message: err.to_string(),
                r#type: kind.to_string(),
            },
        }),
    )
        .into_response()
}
