pub mod audit;
pub mod metrics;
pub mod raw;
pub mod report;

pub use audit::{AuditFinding, Category};
pub use metrics::{MetricSample, MetricSet};
pub use report::{DeviceReport, ExportOptions, Report};
