//! HTTP request handlers for the Payroll Export Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ExportError;
use crate::export::{
    export_records, filter_detail_lines, normalize_records, summarize_kpis, write_xlsx,
};

use super::request::{ExportRequest, KpiRequest, SearchRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// MIME type of an Office Open XML workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/export", post(export_handler))
        .route("/export/preview", post(preview_handler))
        .route("/kpis", post(kpis_handler))
        .route("/lines/search", post(search_handler))
        .with_state(state)
}

/// Handler for POST /export.
///
/// Builds the workbook for a transaction and returns it as an `.xlsx`
/// attachment.
async fn export_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing export request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let result = export_records(&request.transaction_id, request.lines, state.config())
        .and_then(|workbook| write_xlsx(&workbook).map(|bytes| (workbook, bytes)));

    match result {
        Ok((workbook, bytes)) => {
            info!(
                correlation_id = %correlation_id,
                transaction_id = %workbook.transaction_id,
                employees = workbook.summary.employees,
                bytes = bytes.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Export completed successfully"
            );
            let disposition = format!("attachment; filename=\"{}\"", workbook.file_name);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /export/preview.
///
/// Runs the same pipeline as `/export` but returns the workbook as JSON.
async fn preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing export preview request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match export_records(&request.transaction_id, request.lines, state.config()) {
        Ok(workbook) => {
            info!(
                correlation_id = %correlation_id,
                transaction_id = %workbook.transaction_id,
                sheets = workbook.sheets.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Export preview completed successfully"
            );
            (StatusCode::OK, Json(workbook)).into_response()
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /kpis.
async fn kpis_handler(
    State(state): State<AppState>,
    payload: Result<Json<KpiRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing KPI request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let result = normalize_records(request.lines, state.config())
        .and_then(|lines| summarize_kpis(&lines));

    match result {
        Ok(kpis) => {
            info!(
                correlation_id = %correlation_id,
                employees = kpis.employees,
                net_pay = %kpis.net_pay,
                "KPIs computed"
            );
            (StatusCode::OK, Json(kpis)).into_response()
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /lines/search.
///
/// Returns the lines visible in the detail table, optionally narrowed by a
/// free-text query.
async fn search_handler(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing line search request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match normalize_records(request.lines, state.config()) {
        Ok(lines) => {
            let visible = filter_detail_lines(&lines, request.query.as_deref());
            info!(
                correlation_id = %correlation_id,
                input_lines = lines.len(),
                matched_lines = visible.len(),
                "Line search completed"
            );
            (StatusCode::OK, Json(visible)).into_response()
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Turns a JSON extraction failure into a `400` response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, including missing fields.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn error_response(err: ExportError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}
