mod export;
mod scrape;

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use mailsift_export::OutputDir;
use mailsift_scraper::BatchProcessor;

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<BatchProcessor>,
    pub output: OutputDir,
}

/// Error body returned by every endpoint: `{ "error", "code", "request_id" }`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: &'static str,
    pub request_id: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: message.into(),
            code,
            request_id: request_id.into(),
        }
    }

    pub fn bad_request(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(request_id, "bad_request", message)
    }

    pub fn internal(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(request_id, "internal_error", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code {
            "bad_request" | "unreachable" => StatusCode::BAD_REQUEST,
            "not_found" => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Unwraps a JSON body, turning axum's plain-text rejection into an [`ApiError`].
pub(super) fn json_body<T>(
    request_id: &str,
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        ApiError::bad_request(request_id, rejection.body_text())
    })
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/scrape", post(scrape::scrape_single))
        .route("/api/scrape-multiple", post(scrape::scrape_multiple))
        .route("/api/export-excel", post(export::export_excel))
        .route("/api/download/{filename}", get(export::download))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthData { status: "ok" }))
}
