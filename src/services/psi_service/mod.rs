pub mod fallback;
pub mod fetch;
pub mod normalize;

/// One best-effort attempt per upstream request; anything slower than this
/// counts as a failed aggregation.
pub const UPSTREAM_TIMEOUT_SECS: u64 = 60;

pub use fallback::fallback_report;
pub use fetch::fetch_pagespeed_report;
pub use normalize::normalize_lighthouse;
