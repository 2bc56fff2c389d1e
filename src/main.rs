use std::sync::Arc;

mod api;
mod error;
mod models;
mod services;
mod utils;

use models::app::{AppState, PsiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = PsiConfig::from_env();
    if config.api_key.is_empty() {
        log::warn!("PSI_API_KEY is not set; upstream requests will fail and exports will carry fallback data");
    }
    let state = Arc::new(AppState::new(config));

    let app = api::router(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    log::info!("pagepulse listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
