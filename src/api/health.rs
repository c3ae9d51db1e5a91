//! Liveness and health endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::Json;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    /// Providers that will be tried, in order
    pub providers: Vec<String>,
    /// Number of local intent rules, fallback included
    pub local_rules: usize,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// No provider is configured, every reply comes from the local responder
    Degraded,
}

/// GET /
pub async fn banner() -> &'static str {
    "MindSpark AI gateway is running"
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let providers: Vec<String> = state
        .chain
        .providers()
        .enabled_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let status = if providers.is_empty() {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers,
        local_rules: state.chain.responder().rules().len(),
    };

    (StatusCode::OK, Json(response))
}
