use crate::error::AuditError;
use crate::models::psi::raw::{LighthouseResult, RawAudit, RawCategories, RawCategory};
use crate::models::psi::{AuditFinding, Category, DeviceReport, MetricSample, MetricSet};
use std::collections::HashMap;

// Audits scoring at or above this are considered passing and are not
// surfaced as opportunities.
const OPPORTUNITY_SCORE_CEILING: f64 = 0.9;
const MAX_OPPORTUNITIES: usize = 20;

// Well-known audit ids the five fixed metrics are read from.
const LCP_AUDIT: &str = "largest-contentful-paint";
const CLS_AUDIT: &str = "cumulative-layout-shift";
const FCP_AUDIT: &str = "first-contentful-paint";
const TBT_AUDIT: &str = "total-blocking-time";
const SI_AUDIT: &str = "speed-index";

/// Converts one strategy's Lighthouse result into a fixed-shape
/// `DeviceReport`. Pure; the only error is a structurally empty payload.
pub fn normalize_lighthouse(result: &LighthouseResult) -> Result<DeviceReport, AuditError> {
    let categories = result
        .categories
        .as_ref()
        .ok_or(AuditError::MalformedPayload("categories"))?;
    let audits = result
        .audits
        .as_ref()
        .ok_or(AuditError::MalformedPayload("audits"))?;

    Ok(DeviceReport {
        performance: category_score(categories.get(Category::Performance)),
        accessibility: category_score(categories.get(Category::Accessibility)),
        best_practices: category_score(categories.get(Category::BestPractices)),
        seo: category_score(categories.get(Category::Seo)),
        metrics: extract_metrics(audits),
        audits: rank_opportunities(categories, audits),
    })
}

// Upstream scores are 0-1 fractions; a missing score counts as 0, never as
// absent.
fn category_score(category: Option<&RawCategory>) -> u8 {
    let fraction = category.and_then(|c| c.score).unwrap_or(0.0);
    (fraction * 100.0).round() as u8
}

fn extract_metrics(audits: &HashMap<String, RawAudit>) -> MetricSet {
    MetricSet {
        lcp: metric_sample(audits, LCP_AUDIT),
        cls: metric_sample(audits, CLS_AUDIT),
        fcp: metric_sample(audits, FCP_AUDIT),
        tbt: metric_sample(audits, TBT_AUDIT),
        si: metric_sample(audits, SI_AUDIT),
    }
}

// A metric whose audit is missing altogether becomes an all-absent sample.
fn metric_sample(audits: &HashMap<String, RawAudit>, id: &str) -> MetricSample {
    match audits.get(id) {
        Some(audit) => MetricSample {
            display_value: audit.display_value.clone(),
            score: audit.score,
            numeric_value: audit.numeric_value,
        },
        None => MetricSample::default(),
    }
}

// Walks the four categories' audit references in fixed order, keeps the
// failing or unscored ones, dedupes across categories (first category wins),
// sorts worst-first and caps the list.
fn rank_opportunities(
    categories: &RawCategories,
    audits: &HashMap<String, RawAudit>,
) -> Vec<AuditFinding> {
    let mut opportunities: Vec<AuditFinding> = Vec::new();

    for category in Category::ALL {
        let Some(refs) = categories.get(category).and_then(|c| c.audit_refs.as_ref()) else {
            continue;
        };
        for audit_ref in refs {
            let Some(audit) = audits.get(&audit_ref.id) else {
                continue;
            };
            if !is_opportunity(audit) {
                continue;
            }
            if opportunities.iter().any(|o| o.id == audit_ref.id) {
                continue;
            }
            opportunities.push(AuditFinding {
                id: audit_ref.id.clone(),
                title: audit.title.clone().unwrap_or_default(),
                description: audit.description.clone().unwrap_or_default(),
                score: audit.score,
                display_value: audit.display_value.clone(),
                numeric_value: audit.numeric_value,
                category,
            });
        }
    }

    // Stable sort: unscored audits count as 0 and ties keep encounter order.
    opportunities.sort_by(|a, b| {
        a.score
            .unwrap_or(0.0)
            .total_cmp(&b.score.unwrap_or(0.0))
    });
    opportunities.truncate(MAX_OPPORTUNITIES);
    opportunities
}

fn is_opportunity(audit: &RawAudit) -> bool {
    match audit.score {
        None => true,
        Some(score) => score < OPPORTUNITY_SCORE_CEILING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn lighthouse(value: Value) -> LighthouseResult {
        serde_json::from_value(value).unwrap()
    }

    fn audit_entry(title: &str, score: Value) -> Value {
        json!({
            "title": title,
            "description": format!("{} description", title),
            "score": score,
        })
    }

    #[test]
    fn category_scores_are_rounded_half_up() {
        let result = lighthouse(json!({
            "categories": {
                "performance": { "score": 0.375 },
                "accessibility": { "score": 0.92 },
                "best-practices": { "score": 1.0 },
                "seo": { "score": 0.004 },
            },
            "audits": {},
        }));

        let device = normalize_lighthouse(&result).unwrap();
        // 37.5 rounds half-up
        assert_eq!(device.performance, 38);
        assert_eq!(device.accessibility, 92);
        assert_eq!(device.best_practices, 100);
        assert_eq!(device.seo, 0);
    }

    #[test]
    fn missing_category_score_defaults_to_zero() {
        let result = lighthouse(json!({
            "categories": {
                "performance": { "score": 0.5 },
                "accessibility": {},
            },
            "audits": {},
        }));

        let device = normalize_lighthouse(&result).unwrap();
        assert_eq!(device.accessibility, 0);
        assert_eq!(device.best_practices, 0);
        assert_eq!(device.seo, 0);
    }

    #[test]
    fn metrics_are_copied_verbatim_without_defaulting() {
        let result = lighthouse(json!({
            "categories": { "performance": { "score": 0.9 } },
            "audits": {
                "largest-contentful-paint": {
                    "displayValue": "3.5 s",
                    "score": 0.1,
                    "numericValue": 3500.0,
                },
                "total-blocking-time": {
                    "score": 0.4,
                },
            },
        }));

        let metrics = normalize_lighthouse(&result).unwrap().metrics;
        assert_eq!(metrics.lcp.display_value.as_deref(), Some("3.5 s"));
        assert_eq!(metrics.lcp.score, Some(0.1));
        assert_eq!(metrics.lcp.numeric_value, Some(3500.0));
        // partially present audit keeps its absent fields absent
        assert_eq!(metrics.tbt.score, Some(0.4));
        assert!(metrics.tbt.display_value.is_none());
        assert!(metrics.tbt.numeric_value.is_none());
        // fully missing audit yields an all-absent sample, not an error
        assert_eq!(metrics.cls, MetricSample::default());
    }

    #[test]
    fn opportunities_respect_the_inclusion_threshold() {
        let result = lighthouse(json!({
            "categories": {
                "performance": {
                    "score": 0.5,
                    "auditRefs": [
                        { "id": "zero" },
                        { "id": "mid" },
                        { "id": "passing" },
                    ],
                },
            },
            "audits": {
                "zero": audit_entry("Zero", json!(0.0)),
                "mid": audit_entry("Mid", json!(0.85)),
                "passing": audit_entry("Passing", json!(0.95)),
            },
        }));

        let audits = normalize_lighthouse(&result).unwrap().audits;
        let ids: Vec<&str> = audits.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["zero", "mid"]);
    }

    #[test]
    fn unscored_audits_are_included_and_sort_as_zero() {
        let result = lighthouse(json!({
            "categories": {
                "performance": {
                    "auditRefs": [
                        { "id": "mid" },
                        { "id": "informational" },
                        { "id": "low" },
                    ],
                },
            },
            "audits": {
                "mid": audit_entry("Mid", json!(0.5)),
                "informational": audit_entry("Informational", Value::Null),
                "low": audit_entry("Low", json!(0.0)),
            },
        }));

        let audits = normalize_lighthouse(&result).unwrap().audits;
        let ids: Vec<&str> = audits.iter().map(|a| a.id.as_str()).collect();
        // null and 0.0 tie at zero; the stable sort keeps encounter order
        assert_eq!(ids, vec!["informational", "low", "mid"]);
    }

    #[test]
    fn audits_referenced_by_two_categories_appear_once() {
        let result = lighthouse(json!({
            "categories": {
                "performance": { "auditRefs": [{ "id": "shared" }] },
                "seo": { "auditRefs": [{ "id": "shared" }] },
            },
            "audits": {
                "shared": audit_entry("Shared", json!(0.2)),
            },
        }));

        let audits = normalize_lighthouse(&result).unwrap().audits;
        assert_eq!(audits.len(), 1);
        // tagged with whichever category found it first
        assert_eq!(audits[0].category, Category::Performance);
    }

    #[test]
    fn opportunity_list_is_capped_at_twenty() {
        let mut refs = Vec::new();
        let mut audits = serde_json::Map::new();
        for i in 0..30 {
            let id = format!("audit-{i}");
            refs.push(json!({ "id": id }));
            audits.insert(id.clone(), audit_entry(&id, json!(0.01 * i as f64)));
        }

        let result = lighthouse(json!({
            "categories": { "performance": { "auditRefs": refs } },
            "audits": audits,
        }));

        let ranked = normalize_lighthouse(&result).unwrap().audits;
        assert_eq!(ranked.len(), 20);
        // the worst score survives the cut
        assert_eq!(ranked[0].id, "audit-0");
    }

    #[test]
    fn unresolved_audit_references_are_skipped() {
        let result = lighthouse(json!({
            "categories": {
                "performance": { "auditRefs": [{ "id": "ghost" }, { "id": "real" }] },
            },
            "audits": {
                "real": audit_entry("Real", json!(0.3)),
            },
        }));

        let audits = normalize_lighthouse(&result).unwrap().audits;
        assert_eq!(audits.len(), 1);
        assert_eq!(audits[0].id, "real");
    }

    #[test]
    fn missing_top_level_maps_are_malformed() {
        let no_audits = lighthouse(json!({ "categories": {} }));
        assert!(matches!(
            normalize_lighthouse(&no_audits),
            Err(AuditError::MalformedPayload("audits"))
        ));

        let no_categories = lighthouse(json!({ "audits": {} }));
        assert!(matches!(
            normalize_lighthouse(&no_categories),
            Err(AuditError::MalformedPayload("categories"))
        ));
    }
}
