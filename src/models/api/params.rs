use crate::models::psi::ExportOptions;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub url: String,
}

// Visibility flags for the export endpoints. Both sections are included
// unless explicitly switched off.
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    #[serde(default = "default_true")]
    pub mobile_audits: bool,
    #[serde(default = "default_true")]
    pub desktop_audits: bool,
}

fn default_true() -> bool {
    true
}

impl ExportParams {
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            include_mobile_audits: self.mobile_audits,
            include_desktop_audits: self.desktop_audits,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiMessage {
    pub message: String,
    pub timestamp: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
