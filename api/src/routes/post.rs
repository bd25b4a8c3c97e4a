use crate::{
    AppState,
    dto::{CreatePostRequest, DeleteResponse, PaginatedResponse, PaginationParams},
    errors::ApiError,
    models::{Post, PostUpdate},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::info;
use validator::Validate;

use super::parse_id;

/// POST /api/posts
/// Body: { "user_id": "...", "content": "..." }
pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    payload.validate()?;

    if state.store.find_profile(payload.user_id)?.is_none() {
        return Err(ApiError::ValidationError(format!(
            "Unknown author: {}",
            payload.user_id
        )));
    }

    let post = Post::new(payload.user_id, payload.content);
    state.store.insert_post(post.clone())?;

    info!("Post created: {} by user {}", post.id, post.user_id);

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/posts?page=1&limit=10
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<Post>>, ApiError> {
    let mut posts = state.store.list_posts()?;

    // Sort by creation date (newest first)
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(PaginatedResponse::paginate(&posts, &params)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let id = parse_id(&id)?;
    let post = state.store.find_post(id)?.ok_or(ApiError::NotFound)?;

    Ok(Json(post))
}

/// DELETE /api/posts/{id}
/// Response: { "success": true } if a post was removed, { "success": false } otherwise
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&id)?;
    let removed = state.store.delete_post(id)?;

    if removed.is_some() {
        info!("Post deleted: {}", id);
    }

    Ok(Json(DeleteResponse {
        success: removed.is_some(),
    }))
}

/// PATCH /api/posts/{id}
/// Body: any subset of { "content", "likes", "comments" }
///
/// Responds with the post as it was before the update.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PostUpdate>,
) -> Result<Json<Post>, ApiError> {
    let id = parse_id(&id)?;
    payload.validate()?;

    let before = state
        .store
        .update_post(id, &payload)?
        .ok_or(ApiError::NotFound)?;

    info!("Post updated: {}", id);

    Ok(Json(before))
}
