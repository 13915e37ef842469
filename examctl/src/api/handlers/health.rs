//! Service banner and health endpoints.

use axum::Json;
use serde_json::{json, Value};

/// Service banner with the running version
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Exam Registration Platform API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Liveness endpoint for load balancers and probes
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
