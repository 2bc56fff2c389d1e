use crate::models::api::{AnalyzeParams, ApiMessage, ExportParams};
use crate::models::app::AppState;
use crate::models::psi::Report;
use crate::services::export_service::{export_markdown, export_pdf, export_toon};
use crate::services::psi_service::fetch_pagespeed_report;
use crate::utils::export_filename;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, info};
use std::sync::Arc;

/// Runs a fresh aggregation for the given URL and publishes the result. The
/// response always carries a report; on upstream failure it is the fixed
/// fallback and the reason lands in `last_error`.
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyzeParams>,
) -> (StatusCode, Json<Report>) {
    info!("starting analysis for {}", params.url);
    let ticket = state.begin_analysis().await;

    let report = fetch_pagespeed_report(&state, &params.url).await;

    if !state.publish_report(ticket, report.clone()).await {
        info!("discarding superseded analysis for {}", report.url);
    }
    state.finish_analysis();

    (StatusCode::OK, Json(report))
}

pub async fn report_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.report.read().await.clone() {
        Some(report) => (StatusCode::OK, Json(report)).into_response(),
        None => no_report_response(),
    }
}

pub async fn reset_handler(State(state): State<Arc<AppState>>) -> (StatusCode, Json<ApiMessage>) {
    state.clear_report().await;
    (StatusCode::OK, Json(ApiMessage::new("report cleared")))
}

pub async fn export_markdown_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> Response {
    let Some(report) = state.report.read().await.clone() else {
        return no_report_response();
    };

    let body = export_markdown(&report, &params.options());
    attachment(body.into_bytes(), "text/markdown", &export_filename("md"))
}

pub async fn export_pdf_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> Response {
    let Some(report) = state.report.read().await.clone() else {
        return no_report_response();
    };

    match export_pdf(&report, &params.options()) {
        Ok(bytes) => attachment(bytes, "application/pdf", &export_filename("pdf")),
        Err(err) => {
            error!("pdf export failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiMessage::new(format!("pdf export failed: {}", err))),
            )
                .into_response()
        }
    }
}

pub async fn export_toon_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> Response {
    let Some(report) = state.report.read().await.clone() else {
        return no_report_response();
    };

    let body = export_toon(&report, &params.options());
    attachment(body.into_bytes(), "application/json", &export_filename("json"))
}

// Encoders are never invoked without a report; the missing-report case is
// answered here instead.
fn no_report_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiMessage::new(
            crate::error::AuditError::EncodingPrecondition.to_string(),
        )),
    )
        .into_response()
}

fn attachment(bytes: Vec<u8>, content_type: &str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}
