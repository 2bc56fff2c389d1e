use crate::models::psi::audit::Category;
use serde::Deserialize;
use std::collections::HashMap;

// Typed mirror of the PageSpeed Insights v5 response. Every field the
// upstream may omit is an Option here; the defaulting rules live in one
// place, the normalizer, instead of at each access site.

#[derive(Debug, Deserialize)]
pub struct PagespeedResponse {
    #[serde(rename = "lighthouseResult")]
    pub lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LighthouseResult {
    pub categories: Option<RawCategories>,
    pub audits: Option<HashMap<String, RawAudit>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawCategories {
    pub performance: Option<RawCategory>,
    pub accessibility: Option<RawCategory>,
    #[serde(rename = "best-practices")]
    pub best_practices: Option<RawCategory>,
    pub seo: Option<RawCategory>,
}

impl RawCategories {
    pub fn get(&self, category: Category) -> Option<&RawCategory> {
        match category {
            Category::Performance => self.performance.as_ref(),
            Category::Accessibility => self.accessibility.as_ref(),
            Category::BestPractices => self.best_practices.as_ref(),
            Category::Seo => self.seo.as_ref(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawCategory {
    pub score: Option<f64>,
    #[serde(rename = "auditRefs")]
    pub audit_refs: Option<Vec<AuditRef>>,
}

#[derive(Debug, Deserialize)]
pub struct AuditRef {
    pub id: String,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawAudit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub score: Option<f64>,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
    #[serde(rename = "numericValue")]
    pub numeric_value: Option<f64>,
}
