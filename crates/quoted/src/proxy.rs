use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use quote_store::{DeploymentMode, ProviderQuote};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::state::AppState;

/// Optional filters clients may pass through to the provider
#[derive(Debug, Default, Deserialize)]
pub struct QuoteQuery {
    pub category: Option<String>,
}

/// Build the HTTP surface: the proxy route, the serverless-function route
/// and a health probe
pub fn router(state: AppState) -> Router {
    // Browsers call us from whatever origin serves the UI
    let cors = CorsLayer::new().allow_origin(Any);

    Router::new()
        .route(DeploymentMode::Proxy.path(), get(quotes_handler))
        .route(DeploymentMode::Serverless.path(), get(serverless_quote_handler))
        .route("/healthz", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Handler for /api/v1/quotes
/// Returns the provider's list unchanged, minus the credentials
pub async fn quotes_handler(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<Vec<ProviderQuote>>, AppError> {
    info!("Received quote list request (category: {:?})", query.category);

    let quotes = state
        .provider
        .fetch_quotes(&state.client, state.config.clone(), query.category)
        .await?;

    debug!("Returning {} quote(s)", quotes.len());
    Ok(Json(quotes))
}

/// Handler for /.netlify/functions/get-quote
/// Returns a single quote object instead of a list
pub async fn serverless_quote_handler(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<ProviderQuote>, AppError> {
    info!("Received single quote request (category: {:?})", query.category);

    let quote = state
        .provider
        .fetch_quotes(&state.client, state.config.clone(), query.category)
        .await?
        .into_iter()
        .next()
        .ok_or(AppError::NoQuote)?;

    Ok(Json(quote))
}

/// Handler for /healthz
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Error types for the proxy
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },
    #[error("{0}")]
    BackendError(String),
    #[error("{0}")]
    TransformError(String),
    #[error("No quote returned by provider")]
    NoQuote,
    #[error("{0}")]
    Config(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Upstream { status, .. } => *status,
            AppError::BackendError(_) | AppError::TransformError(_) | AppError::NoQuote => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({ "error": self.to_string() });

        (status, Json(body)).into_response()
    }
}
