use crate::{
    AppState,
    dto::CreateProfileRequest,
    errors::ApiError,
    models::Profile,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::parse_id;

/// POST /api/profiles
/// Body: { "email": "...", "username": "...", "name": "...", "profile_image_link": "..." }
pub async fn create_profile(
    State(state): State<AppState>,
    Json(payload): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    payload.validate()?;

    let profile = Profile {
        id: Uuid::new_v4(),
        username: payload.username,
        name: payload.name,
        profile_image_link: payload.profile_image_link,
        email: payload.email,
        created_at: Utc::now().timestamp(),
    };

    state.store.insert_profile(profile.clone())?;

    info!("New profile registered: {}", profile.email);

    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/profiles
pub async fn list_profiles(State(state): State<AppState>) -> Result<Json<Vec<Profile>>, ApiError> {
    let mut profiles = state.store.list_profiles()?;
    profiles.sort_by(|a, b| a.username.cmp(&b.username));

    Ok(Json(profiles))
}

/// GET /api/profiles/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let id = parse_id(&id)?;
    let profile = state.store.find_profile(id)?.ok_or(ApiError::NotFound)?;

    Ok(Json(profile))
}

/// GET /api/profiles/email/{email}
pub async fn get_profile_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let profile = state
        .store
        .find_profile_by_email(&email)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        routes::testing::{app, call},
        store::MemoryStore,
    };

    fn maria() -> serde_json::Value {
        json!({
            "email": "maria@example.com",
            "username": "maria",
            "name": "Maria Silva",
        })
    }

    #[tokio::test]
    async fn created_profile_is_found_by_email_and_id() {
        let app = app(Arc::new(MemoryStore::new()));

        let (status, created) = call(&app, "POST", "/api/profiles", Some(maria())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, by_email) =
            call(&app, "GET", "/api/profiles/email/maria@example.com", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(by_email["_id"], created["_id"]);

        let uri = format!("/api/profiles/{}", created["_id"].as_str().unwrap());
        let (status, by_id) = call(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(by_id["username"], "maria");
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let app = app(Arc::new(MemoryStore::new()));

        call(&app, "POST", "/api/profiles", Some(maria())).await;
        let (status, body) = call(&app, "POST", "/api/profiles", Some(maria())).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Profile already exists");
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let app = app(Arc::new(MemoryStore::new()));
        let mut body = maria();
        body["email"] = json!("not-an-email");

        let (status, body) = call(&app, "POST", "/api/profiles", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Invalid email format"));
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let app = app(Arc::new(MemoryStore::new()));
        let (status, _) = call(&app, "GET", "/api/profiles/email/nobody@example.com", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_returns_every_profile() {
        let app = app(Arc::new(MemoryStore::new()));
        call(&app, "POST", "/api/profiles", Some(maria())).await;
        call(
            &app,
            "POST",
            "/api/profiles",
            Some(json!({ "email": "joao@example.com", "username": "joao", "name": "Joao" })),
        )
        .await;

        let (status, body) = call(&app, "GET", "/api/profiles", None).await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["username"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["joao", "maria"]);
    }
}
