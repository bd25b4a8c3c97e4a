use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use tracing::warn;

use crate::AppState;

/// GET /health
/// Response: 200 when the store answers, 503 otherwise
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let (status, health, store) = match state.store.ping() {
        Ok(()) => (StatusCode::OK, "healthy", "up"),
        Err(e) => {
            warn!("Health check: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
        }
    };

    (
        status,
        Json(serde_json::json!({
          "status": health,
          "store": store,
          "timestamp": Utc::now().timestamp()
        })),
    )
}
