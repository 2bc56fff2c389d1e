use chrono::Utc;

/// Names an export artifact with the current Unix-epoch milliseconds, e.g.
/// `psi-report-1717243200000.md`.
pub fn export_filename(extension: &str) -> String {
    format!("psi-report-{}.{}", Utc::now().timestamp_millis(), extension)
}
