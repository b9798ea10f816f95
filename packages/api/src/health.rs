// ABOUTME: Liveness endpoint
// ABOUTME: Unauthenticated, reports service name, version and current time

use std::time::{SystemTime, UNIX_EPOCH};

use axum::Json;
use serde_json::{json, Value};

use super::error::ApiResult;

pub async fn health_check() -> ApiResult<Json<Value>> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    Ok(Json(json!({
        "status": "healthy",
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
        "service": "proposer-api"
    })))
}
