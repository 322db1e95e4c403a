//! Scrape endpoints: one URL, or an ordered batch.

use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use mailsift_core::{CoreError, ScrapeRecord, Target};
use mailsift_scraper::ScraperError;

use crate::middleware::RequestId;

use super::{json_body, ApiError, AppState};

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(in crate::api) struct ScrapeRequest {
    pub url: Option<String>,
}

/// `null` entries are accepted and treated like blank strings.
#[derive(Debug, Deserialize)]
pub(in crate::api) struct ScrapeMultipleRequest {
    #[serde(default)]
    pub urls: Vec<Option<String>>,
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(in crate::api) struct ScrapeResponse {
    pub success: bool,
    pub url: String,
    pub emails: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct ScrapeMultipleResponse {
    pub results: Vec<ScrapeRecord>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/scrape: scrape a single page.
pub(in crate::api) async fn scrape_single(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let rid = &req_id.0;
    let body = json_body(rid, body)?;

    let target = Target::parse(body.url.as_deref().unwrap_or_default())
        .map_err(|CoreError::InvalidInput(msg)| ApiError::bad_request(rid, msg))?;

    let emails = state
        .processor
        .scrape(&target)
        .await
        .map_err(|e| map_scraper_error(rid, e))?;

    Ok(Json(ScrapeResponse {
        success: true,
        url: target.into_string(),
        emails,
    }))
}

/// POST /api/scrape-multiple: scrape every URL, isolating per-URL failures.
///
/// Blank and `null` entries are skipped without a result entry.
pub(in crate::api) async fn scrape_multiple(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ScrapeMultipleRequest>, JsonRejection>,
) -> Result<Json<ScrapeMultipleResponse>, ApiError> {
    let rid = &req_id.0;
    let body = json_body(rid, body)?;

    if body.urls.is_empty() {
        return Err(ApiError::bad_request(rid, "URLs are required"));
    }

    let urls: Vec<String> = body.urls.into_iter().map(Option::unwrap_or_default).collect();
    let results = state.processor.process(&urls).await;

    Ok(Json(ScrapeMultipleResponse { results }))
}

fn map_scraper_error(request_id: &str, error: ScraperError) -> ApiError {
    match error {
        ScraperError::InvalidInput(msg) => ApiError::bad_request(request_id, msg),
        ScraperError::Unreachable { url, reason } => {
            tracing::warn!(url = %url, reason = %reason, "single scrape target unreachable");
            ApiError::new(
                request_id,
                "unreachable",
                format!("Could not reach URL: {reason}"),
            )
        }
        other => {
            tracing::error!(error = %other, "single scrape failed");
            ApiError::internal(request_id, other.to_string())
        }
    }
}
