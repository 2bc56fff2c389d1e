use thiserror::Error;

use crate::services::psi_service::UPSTREAM_TIMEOUT_SECS;

/// Everything that can go wrong between accepting a URL and publishing a
/// report. The upstream-facing variants are all collapsed into the fallback
/// report at the aggregation boundary; none of them are fatal.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("upstream payload is missing its {0} map")]
    MalformedPayload(&'static str),

    #[error("upstream request failed: {0}")]
    UpstreamFailure(String),

    #[error("upstream request timed out after {0}s")]
    Timeout(u64),

    #[error("no report is available to encode")]
    EncodingPrecondition,
}

impl From<reqwest::Error> for AuditError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AuditError::Timeout(UPSTREAM_TIMEOUT_SECS)
        } else {
            AuditError::UpstreamFailure(err.to_string())
        }
    }
}
