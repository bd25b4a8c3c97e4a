mod health;
mod post;
mod profile;

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;
use uuid::Uuid;

use crate::{AppState, errors::ApiError};

pub use health::health_check;
pub use post::{create_post, delete_post, get_post, list_posts, update_post};
pub use profile::{create_profile, get_profile, get_profile_by_email, list_profiles};

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).patch(update_post).delete(delete_post),
        )
        .route("/profiles", get(list_profiles).post(create_profile))
        .route("/profiles/{id}", get(get_profile))
        .route("/profiles/email/{email}", get(get_profile_by_email));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(middleware::from_fn_with_state(state.clone(), rate_limit)),
        )
        .with_state(state)
}

/// Rejects the request once the global quota for the current second is spent.
async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.limiter.check().is_err() {
        warn!("Rate limit exceeded: {} {}", request.method(), request.uri());
        return Err(ApiError::RateLimited);
    }
    Ok(next.run(request).await)
}

/// Path ids arrive as raw strings so a malformed id becomes a JSON
/// validation error instead of axum's plain-text rejection.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::ValidationError(format!("Invalid id: {raw}")))
}


#[cfg(test)]
mod tests {
    use std::{num::NonZeroU32, sync::Arc};

    use axum::http::StatusCode;

    use super::testing::call;
    use crate::{
        AppState,
        store::{MemoryStore, testing::UnavailableStore},
    };

    #[tokio::test]
    async fn health_reports_healthy() {
        let app = super::testing::app(Arc::new(MemoryStore::new()));
        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["store"], "up");
    }

    #[tokio::test]
    async fn health_reports_store_outage() {
        let app = super::testing::app(Arc::new(UnavailableStore));
        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["store"], "down");
    }

    #[tokio::test]
    async fn requests_over_quota_are_rejected() {
        let state = AppState::new(Arc::new(MemoryStore::new()), NonZeroU32::new(1).unwrap());
        let app = super::router(state);

        let (first, _) = call(&app, "GET", "/health", None).await;
        let (second, body) = call(&app, "GET", "/health", None).await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "Too many requests");
    }
}
