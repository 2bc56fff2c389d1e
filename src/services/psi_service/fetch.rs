use crate::error::AuditError;
use crate::models::app::AppState;
use crate::models::psi::raw::PagespeedResponse;
use crate::models::psi::{Category, DeviceReport, Report};
use crate::services::psi_service::{fallback_report, normalize_lighthouse};
use crate::utils::ensure_scheme;
use futures::future::try_join;
use log::{info, warn};

/// Runs the full aggregation for a user-supplied URL. This never fails: any
/// upstream problem is logged, recorded on the state as the latest error and
/// collapsed into the fixed fallback report.
pub async fn fetch_pagespeed_report(state: &AppState, url: &str) -> Report {
    let target = ensure_scheme(url);

    match run_analysis(state, &target).await {
        Ok(report) => {
            info!("pagespeed aggregation completed for {}", target);
            report
        }
        Err(err) => {
            warn!("pagespeed aggregation failed for {}: {}", target, err);
            state.record_error(err.to_string()).await;
            fallback_report(&target)
        }
    }
}

// Fan out to both strategies and fan in on both. Either failure fails the
// whole aggregation; there is no partial report. The merge is commutative,
// so completion order between the two requests does not matter.
async fn run_analysis(state: &AppState, target: &str) -> Result<Report, AuditError> {
    let (mobile, desktop) = try_join(
        fetch_strategy(state, target, "mobile"),
        fetch_strategy(state, target, "desktop"),
    )
    .await?;

    Ok(Report {
        url: target.to_string(),
        mobile,
        desktop,
    })
}

async fn fetch_strategy(
    state: &AppState,
    target: &str,
    strategy: &str,
) -> Result<DeviceReport, AuditError> {
    let endpoint = format!("{}/runPagespeed", state.config.base_url);

    // The category selector is repeated once per requested category.
    let mut query: Vec<(&str, &str)> = vec![
        ("url", target),
        ("key", state.config.api_key.as_str()),
        ("strategy", strategy),
    ];
    for category in Category::ALL {
        query.push(("category", category.as_str()));
    }

    let response = state
        .http_client
        .get(&endpoint)
        .query(&query)
        .send()
        .await?
        .error_for_status()?;

    let payload: PagespeedResponse = response.json().await?;
    let lighthouse = payload
        .lighthouse_result
        .ok_or(AuditError::MalformedPayload("lighthouseResult"))?;

    normalize_lighthouse(&lighthouse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::app::PsiConfig;
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn state_for(base_url: String) -> AppState {
        AppState::new(PsiConfig {
            api_key: "test-key".to_string(),
            base_url,
        })
    }

    // A canned PSI payload whose performance score depends on the strategy,
    // so the test can tell the two fan-out legs apart.
    async fn mock_pagespeed(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        let score = match params.get("strategy").map(String::as_str) {
            Some("mobile") => 0.37,
            _ => 0.81,
        };
        Json(json!({
            "lighthouseResult": {
                "categories": {
                    "performance": {
                        "score": score,
                        "auditRefs": [{ "id": "render-blocking-resources" }],
                    },
                    "accessibility": { "score": 0.9 },
                    "best-practices": { "score": 1.0 },
                    "seo": { "score": 0.5 },
                },
                "audits": {
                    "render-blocking-resources": {
                        "title": "Eliminate render-blocking resources",
                        "description": "Resources are blocking the first paint.",
                        "score": 0.2,
                        "displayValue": "Potential savings of 300 ms",
                    },
                    "largest-contentful-paint": {
                        "displayValue": "2.1 s",
                        "score": 0.8,
                        "numericValue": 2100.0,
                    },
                },
            },
        }))
    }

    async fn spawn_upstream() -> String {
        let app = Router::new().route("/runPagespeed", get(mock_pagespeed));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    // Grabs a port that is guaranteed to refuse connections.
    async fn refused_base_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn aggregates_both_strategies_into_one_report() {
        let state = state_for(spawn_upstream().await);
        let report = fetch_pagespeed_report(&state, "example.com").await;

        assert_eq!(report.url, "https://example.com");
        assert_eq!(report.mobile.performance, 37);
        assert_eq!(report.desktop.performance, 81);
        assert_eq!(report.mobile.audits[0].id, "render-blocking-resources");
        assert_eq!(
            report.mobile.metrics.lcp.display_value.as_deref(),
            Some("2.1 s")
        );
        assert!(state.last_error.read().await.is_none());
    }

    #[tokio::test]
    async fn unreachable_upstream_yields_the_fallback_report() {
        let state = state_for(refused_base_url().await);
        let report = fetch_pagespeed_report(&state, "example.com").await;

        assert_eq!(report, fallback_report("https://example.com"));
        assert!(state.last_error.read().await.is_some());
    }

    #[tokio::test]
    async fn structurally_empty_payload_yields_the_fallback_report() {
        let app = Router::new().route(
            "/runPagespeed",
            get(|| async { Json(json!({ "lighthouseResult": {} })) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let state = state_for(format!("http://{}", addr));
        let report = fetch_pagespeed_report(&state, "https://example.com").await;

        assert_eq!(report, fallback_report("https://example.com"));
        let error = state.last_error.read().await;
        assert!(error.as_ref().unwrap().contains("missing"));
    }
}
