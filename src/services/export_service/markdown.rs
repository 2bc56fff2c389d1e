use crate::models::psi::{AuditFinding, ExportOptions, MetricSet, Report};
use chrono::{DateTime, Utc};

const HIDDEN_PLACEHOLDER: &str = "(Hidden in report)";

/// Renders the report as a Markdown document. Deterministic for a given
/// report and options, apart from the embedded date line.
pub fn export_markdown(report: &Report, options: &ExportOptions) -> String {
    render_markdown(report, options, Utc::now())
}

// The wall clock is a parameter so the output can be compared byte-for-byte.
fn render_markdown(report: &Report, options: &ExportOptions, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str("# PageSpeed Insights Report\n");
    out.push_str(&format!("URL: {}\n", report.url));
    out.push_str(&format!(
        "Date: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    out.push_str("## Scores\n");
    out.push_str(&format!("- **Mobile**: {}\n", report.mobile.performance));
    out.push_str(&format!("- **Desktop**: {}\n\n", report.desktop.performance));

    out.push_str("## Additional Scores (Mobile)\n");
    out.push_str(&format!("- Accessibility: {}\n", report.mobile.accessibility));
    out.push_str(&format!("- Best Practices: {}\n", report.mobile.best_practices));
    out.push_str(&format!("- SEO: {}\n\n", report.mobile.seo));

    out.push_str("## Additional Scores (Desktop)\n");
    out.push_str(&format!("- Accessibility: {}\n", report.desktop.accessibility));
    out.push_str(&format!("- Best Practices: {}\n", report.desktop.best_practices));
    out.push_str(&format!("- SEO: {}\n\n", report.desktop.seo));

    out.push_str("## Mobile Metrics\n");
    out.push_str(&metric_table(&report.mobile.metrics));
    out.push('\n');

    out.push_str("### Top Opportunities (Mobile)\n");
    out.push_str(&audit_section(
        &report.mobile.audits,
        options.include_mobile_audits,
    ));
    out.push('\n');

    out.push_str("## Desktop Metrics\n");
    out.push_str(&metric_table(&report.desktop.metrics));
    out.push('\n');

    out.push_str("### Top Opportunities (Desktop)\n");
    out.push_str(&audit_section(
        &report.desktop.audits,
        options.include_desktop_audits,
    ));

    out
}

fn metric_table(metrics: &MetricSet) -> String {
    let mut table = String::from("| Metric | Value | Score |\n|--------|-------|-------|\n");
    for (key, sample) in metrics.entries() {
        let value = sample.display_value.as_deref().unwrap_or("N/A");
        let score = match sample.score {
            Some(score) => ((score * 100.0).round() as i64).to_string(),
            None => "-".to_string(),
        };
        table.push_str(&format!("| {} | {} | {} |\n", key.to_uppercase(), value, score));
    }
    table
}

fn audit_section(audits: &[AuditFinding], included: bool) -> String {
    if !included {
        return format!("{}\n", HIDDEN_PLACEHOLDER);
    }
    if audits.is_empty() {
        return "None\n".to_string();
    }

    let mut section = String::new();
    for audit in audits {
        let display_value = audit.display_value.as_deref().unwrap_or("N/A");
        let score = match audit.score {
            Some(score) => score.to_string(),
            None => "null".to_string(),
        };
        section.push_str(&format!(
            "- [{}] **{}** ({}): {} (Score: {})\n",
            audit.category.as_str().to_uppercase(),
            audit.title,
            display_value,
            audit.description,
            score,
        ));
    }
    section
}
