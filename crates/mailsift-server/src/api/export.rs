//! Spreadsheet export and download endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use mailsift_core::ScrapeRecord;
use mailsift_export::ExportError;

use crate::middleware::RequestId;

use super::{json_body, ApiError, AppState};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Deserialize)]
pub(in crate::api) struct ExportRequest {
    #[serde(default)]
    pub results: Vec<ScrapeRecord>,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct ExportResponse {
    pub success: bool,
    pub filename: String,
}

/// POST /api/export-excel: write prior results to a new spreadsheet.
pub(in crate::api) async fn export_excel(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Json<ExportResponse>, ApiError> {
    let rid = &req_id.0;
    let body = json_body(rid, body)?;

    let output = state.output.clone();
    let filename = tokio::task::spawn_blocking(move || {
        mailsift_export::export_records(&output, &body.results)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "export task panicked");
        ApiError::internal(rid, "export failed")
    })?
    .map_err(|e| map_export_error(rid, &e))?;

    Ok(Json(ExportResponse {
        success: true,
        filename,
    }))
}

/// GET /api/download/{filename}: stream an exported file as an attachment.
pub(in crate::api) async fn download(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rid = &req_id.0;
    let path = state
        .output
        .resolve(&filename)
        .map_err(|e| map_export_error(rid, &e))?;

    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            map_export_error(rid, &ExportError::NotFound { filename: filename.clone() })
        } else {
            tracing::error!(path = %path.display(), error = %e, "failed to read export");
            ApiError::internal(rid, "failed to read file")
        }
    })?;

    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes))
}

fn map_export_error(request_id: &str, error: &ExportError) -> ApiError {
    match error {
        ExportError::NothingToExport => ApiError::bad_request(request_id, error.to_string()),
        ExportError::NotFound { .. } => ApiError::new(request_id, "not_found", error.to_string()),
        ExportError::Io { .. } | ExportError::Xlsx(_) => {
            tracing::error!(error = %error, "export failed");
            ApiError::internal(request_id, error.to_string())
        }
    }
}
