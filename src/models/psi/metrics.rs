use serde::{Deserialize, Serialize};

// One performance metric as reported upstream. All three fields are
// independently optional and copied verbatim, never defaulted.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MetricSample {
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
    pub score: Option<f64>,
    #[serde(rename = "numericValue")]
    pub numeric_value: Option<f64>,
}

// The five fixed metrics tracked per strategy.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MetricSet {
    pub lcp: MetricSample,
    pub cls: MetricSample,
    pub fcp: MetricSample,
    pub tbt: MetricSample,
    pub si: MetricSample,
}

impl MetricSet {
    /// Fixed iteration order shared by every encoder.
    pub fn entries(&self) -> [(&'static str, &MetricSample); 5] {
        [
            ("lcp", &self.lcp),
            ("cls", &self.cls),
            ("fcp", &self.fcp),
            ("tbt", &self.tbt),
            ("si", &self.si),
        ]
    }
}
