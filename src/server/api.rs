//! HTTP API server implementation

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::client::DeepLClient;
use crate::core::errors::TranslationError;
use crate::core::models::{TranslationRequest, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG};

/// Application state
#[derive(Clone)]
pub struct AppState {
    translator: Arc<DeepLClient>,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Translation request accepted by the bridge
#[derive(Deserialize)]
pub struct TranslateRequest {
    /// Text to translate
    pub text: String,
    /// Defaults to `AUTO`
    pub source_lang: Option<String>,
    /// Defaults to `ZH`
    pub target_lang: Option<String>,
    /// Requested alternatives, clamped to 0..=3
    #[serde(default)]
    pub alternatives: i64,
}

/// Translation response
#[derive(Serialize)]
pub struct TranslateResponse {
    /// HTTP status mirrored in the body
    pub code: u16,
    /// Primary translation
    pub data: String,
    /// Alternative translations
    pub alternatives: Vec<String>,
    /// Uppercased source language
    pub source_lang: String,
    /// Uppercased target language
    pub target_lang: String,
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    /// HTTP status mirrored in the body
    pub code: u16,
    /// Error description
    pub message: String,
}

impl ErrorResponse {
    fn into_response_with(status: StatusCode, message: impl Into<String>) -> Response {
        let body = ErrorResponse {
            code: status.as_u16(),
            message: message.into(),
        };
        (status, axum::Json(body)).into_response()
    }
}

/// Health check handler
async fn health_check() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "ok".to_string(),
        service: "deepl-translator".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Translation handler
async fn translate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslateRequest>,
) -> Response {
    if payload.text.trim().is_empty() {
        return ErrorResponse::into_response_with(StatusCode::BAD_REQUEST, "text cannot be empty");
    }

    let source_lang = payload
        .source_lang
        .unwrap_or_else(|| DEFAULT_SOURCE_LANG.to_string())
        .to_uppercase();
    let target_lang = payload
        .target_lang
        .unwrap_or_else(|| DEFAULT_TARGET_LANG.to_string())
        .to_uppercase();

    let request = TranslationRequest::new(payload.text)
        .with_source_lang(source_lang.clone())
        .with_target_lang(target_lang.clone())
        .with_alternatives(payload.alternatives);

    match state.translator.try_translate(&request).await {
        Ok(result) => {
            let response = TranslateResponse {
                code: 200,
                data: result.text,
                alternatives: result.alternatives,
                source_lang,
                target_lang,
            };
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(e @ TranslationError::RateLimited { .. }) => {
            warn!("Upstream rate limit: {}", e);
            ErrorResponse::into_response_with(StatusCode::TOO_MANY_REQUESTS, e.to_string())
        }
        Err(e) => {
            warn!("Translation failed: {}", e);
            ErrorResponse::into_response_with(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    }
}

/// Build the router around a client
pub fn router(translator: DeepLClient) -> Router {
    let state = Arc::new(AppState {
        translator: Arc::new(translator),
    });

    Router::new()
        .route("/", get(health_check))
        .route("/translate", post(translate))
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(translator: DeepLClient, host: String, port: u16) -> anyhow::Result<()> {
    let app = router(translator);

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
