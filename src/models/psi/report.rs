use crate::models::psi::audit::AuditFinding;
use crate::models::psi::metrics::MetricSet;
use serde::{Deserialize, Serialize};

// Everything known about one device strategy. Category scores are 0-100
// integers (a missing upstream fraction counts as 0 before rounding), and
// `audits` is already filtered, deduplicated, worst-first and capped at 20.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DeviceReport {
    pub performance: u8,
    pub accessibility: u8,
    pub best_practices: u8,
    pub seo: u8,
    pub metrics: MetricSet,
    pub audits: Vec<AuditFinding>,
}

// The root report entity. Built atomically once both strategies have
// resolved; the published copy is only ever replaced wholesale.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Report {
    pub url: String,
    pub mobile: DeviceReport,
    pub desktop: DeviceReport,
}

// Per-export visibility flags. Supplied with each export call and never
// stored alongside the report.
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    pub include_mobile_audits: bool,
    pub include_desktop_audits: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_mobile_audits: true,
            include_desktop_audits: true,
        }
    }
}
