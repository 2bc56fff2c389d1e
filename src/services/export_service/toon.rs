use crate::models::psi::{AuditFinding, DeviceReport, ExportOptions, MetricSet, Report};
use serde::Serialize;

// TOON (Token Oriented Object Notation): single-line JSON with one-letter
// keys, meant for dropping a whole report into an LLM context window.
// Field order is fixed by these struct declarations; the schema is
// versionless.

#[derive(Serialize)]
struct ToonDocument<'a> {
    u: &'a str,
    s: [u8; 2],
    scores: ToonScores,
    m: ToonStrategyPair<ToonMetrics>,
    a: ToonStrategyPair<Vec<ToonAudit<'a>>>,
}

#[derive(Serialize)]
struct ToonScores {
    m: [u8; 3],
    d: [u8; 3],
}

#[derive(Serialize)]
struct ToonStrategyPair<T> {
    m: T,
    d: T,
}

#[derive(Serialize)]
struct ToonMetrics {
    l: ToonMetric,
    c: ToonMetric,
    f: ToonMetric,
    t: ToonMetric,
    i: ToonMetric,
}

// Deliberately denser than the other encoders: the numeric value, not the
// human display string.
#[derive(Serialize)]
struct ToonMetric {
    v: Option<f64>,
    s: Option<f64>,
}

#[derive(Serialize)]
struct ToonAudit<'a> {
    t: &'a str,
    v: Option<&'a str>,
    c: &'a str,
    d: &'a str,
}

/// Encodes the report into the compact notation. Byte-for-byte stable
/// across repeated calls with identical input.
pub fn export_toon(report: &Report, options: &ExportOptions) -> String {
    let document = ToonDocument {
        u: &report.url,
        s: [report.mobile.performance, report.desktop.performance],
        scores: ToonScores {
            m: strategy_scores(&report.mobile),
            d: strategy_scores(&report.desktop),
        },
        m: ToonStrategyPair {
            m: metrics(&report.mobile.metrics),
            d: metrics(&report.desktop.metrics),
        },
        a: ToonStrategyPair {
            m: audits(&report.mobile.audits, options.include_mobile_audits),
            d: audits(&report.desktop.audits, options.include_desktop_audits),
        },
    };

    serde_json::to_string(&document).expect("TOON document serializes")
}

fn strategy_scores(device: &DeviceReport) -> [u8; 3] {
    [device.accessibility, device.best_practices, device.seo]
}

fn metrics(set: &MetricSet) -> ToonMetrics {
    ToonMetrics {
        l: metric(&set.lcp),
        c: metric(&set.cls),
        f: metric(&set.fcp),
        t: metric(&set.tbt),
        i: metric(&set.si),
    }
}

fn metric(sample: &crate::models::psi::MetricSample) -> ToonMetric {
    ToonMetric {
        v: sample.numeric_value,
        s: sample.score,
    }
}

fn audits(findings: &[AuditFinding], included: bool) -> Vec<ToonAudit<'_>> {
    if !included {
        return Vec::new();
    }
    findings
        .iter()
        .map(|finding| ToonAudit {
            t: &finding.title,
            v: finding.display_value.as_deref(),
            c: finding.category.as_str(),
            d: &finding.description,
        })
        .collect()
}
