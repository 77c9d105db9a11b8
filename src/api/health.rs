//! Health check endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use super::types::Json;
use crate::infrastructure::gdelt::probe_health;

/// Health response with optional per-dependency checks
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Health check status
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Individual dependency health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latency_ms: u64,
}

/// Simple health check - returns 200 while the process is up
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Probes the remote store with the fallback credential
///
/// A failing store only degrades readiness; calls are still accepted and
/// surface their own errors.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let store = check_store(&state).await;

    let response = HealthResponse {
        status: store.status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(vec![store]),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    (StatusCode::OK, Json(response))
}

/// Liveness check - returns 200 while the process runs
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn check_store(state: &AppState) -> HealthCheck {
    let start = Instant::now();
    let healthy = probe_health(&state.gdelt, state.fallback.token()).await;

    HealthCheck {
        name: "gdelt_cloud".to_string(),
        status: if healthy {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        },
        message: (!healthy).then(|| format!("{} is unreachable", state.gdelt.base_url)),
        latency_ms: start.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Degraded).unwrap(),
            "\"degraded\""
        );
    }

    #[test]
    fn test_health_response_omits_empty_checks() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            version: "0.1.0".to_string(),
            checks: None,
            latency_ms: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("checks").is_none());
        assert!(json.get("latency_ms").is_none());
    }
}
