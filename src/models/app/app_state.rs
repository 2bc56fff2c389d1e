use crate::models::psi::Report;
use crate::services::psi_service::UPSTREAM_TIMEOUT_SECS;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/pagespeedonline/v5";

#[derive(Debug, Clone)]
pub struct PsiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl PsiConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("PSI_API_KEY").unwrap_or_default(),
            base_url: std::env::var("PSI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }
}

// Process-wide application state. One report slot, single writer (the
// aggregation completion path), any number of readers. The report is only
// ever replaced wholesale, so readers never observe a half-built one.
pub struct AppState {
    pub config: PsiConfig,
    pub http_client: reqwest::Client,
    pub report: RwLock<Option<Report>>,
    pub loading: AtomicBool,
    pub last_error: RwLock<Option<String>>,
    analysis_seq: AtomicU64,
}

impl AppState {
    pub fn new(config: PsiConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
            .build()
            .expect("failed to build http client");

        Self {
            config,
            http_client,
            report: RwLock::new(None),
            loading: AtomicBool::new(false),
            last_error: RwLock::new(None),
            analysis_seq: AtomicU64::new(0),
        }
    }

    /// Marks a new analysis as in flight and hands back its ticket. Taking a
    /// ticket supersedes every analysis started before it.
    pub async fn begin_analysis(&self) -> u64 {
        self.loading.store(true, Ordering::SeqCst);
        *self.last_error.write().await = None;
        self.analysis_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publishes a finished report unless a newer analysis has started in the
    /// meantime. Returns whether the report was actually published.
    pub async fn publish_report(&self, ticket: u64, report: Report) -> bool {
        if self.analysis_seq.load(Ordering::SeqCst) != ticket {
            return false;
        }
        *self.report.write().await = Some(report);
        true
    }

    pub fn finish_analysis(&self) {
        self.loading.store(false, Ordering::SeqCst);
    }

    pub async fn record_error(&self, message: impl Into<String>) {
        *self.last_error.write().await = Some(message.into());
    }

    pub async fn clear_report(&self) {
        *self.report.write().await = None;
        *self.last_error.write().await = None;
    }
}
