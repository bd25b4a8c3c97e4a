use std::sync::Arc;

use social_api::{AppState, config::Config, routes, store::MemoryStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env().expect("Environment misconfigured!");

    // Create application state
    let state = AppState::new(Arc::new(MemoryStore::new()), config.rate_limit_per_second);

    let app = routes::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind address");

    info!("Server running on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET    /health                     - Health check");
    info!("  GET    /api/posts                  - List posts (paginated)");
    info!("  POST   /api/posts                  - Create post");
    info!("  GET    /api/posts/:id              - Get specific post");
    info!("  PATCH  /api/posts/:id              - Update post (returns previous version)");
    info!("  DELETE /api/posts/:id              - Delete post");
    info!("  GET    /api/profiles               - List profiles");
    info!("  POST   /api/profiles               - Create profile");
    info!("  GET    /api/profiles/:id           - Get profile");
    info!("  GET    /api/profiles/email/:email  - Get profile by email");
    info!("Client base URL: {}", config.api_url);

    axum::serve(listener, app).await.expect("Server error");
}
