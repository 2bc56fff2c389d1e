pub mod api;
pub mod app;
pub mod psi;

pub use api::{AnalyzeParams, ApiMessage, ExportParams};
pub use app::{AppState, PsiConfig};
pub use psi::{AuditFinding, Category, DeviceReport, ExportOptions, MetricSample, MetricSet, Report};
