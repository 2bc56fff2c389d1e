pub mod handler;

pub use handler::{
    analyze_handler, export_markdown_handler, export_pdf_handler, export_toon_handler,
    report_handler, reset_handler,
};

use crate::models::app::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/analyze", get(analyze_handler))
        .route("/report", get(report_handler))
        .route("/reset", post(reset_handler))
        .route("/export/markdown", get(export_markdown_handler))
        .route("/export/pdf", get(export_pdf_handler))
        .route("/export/toon", get(export_toon_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
