use serde::{Deserialize, Serialize};
use std::fmt;

// The four audit groupings requested from upstream, in request order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Performance,
    Accessibility,
    BestPractices,
    Seo,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Performance,
        Category::Accessibility,
        Category::BestPractices,
        Category::Seo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Performance => "performance",
            Category::Accessibility => "accessibility",
            Category::BestPractices => "best-practices",
            Category::Seo => "seo",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// One audit surfaced as an opportunity. `score == None` is an
// informational audit, not a missing value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AuditFinding {
    pub id: String,
    pub title: String,
    pub description: String,
    pub score: Option<f64>,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
    #[serde(rename = "numericValue")]
    pub numeric_value: Option<f64>,
    pub category: Category,
}
