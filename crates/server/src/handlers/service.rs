//! # Service Endpoints

use axum::{extract::State, Json};
use error::ApiResponse;
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Metadata returned by `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub name:           String,
    pub version:        String,
    pub uptime_seconds: u64,
}

/// `GET /health`
pub async fn health() -> &'static str { "OK" }

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Json<ApiResponse<ServiceInfo>> {
    Json(ApiResponse::ok(ServiceInfo {
        name:           "portfolio".to_string(),
        version:        env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}
