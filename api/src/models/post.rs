use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub likes: Vec<Uuid>,
    #[serde(default)]
    pub comments: Vec<Uuid>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Post {
    pub fn new(user_id: Uuid, content: String) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: Uuid::new_v4(),
            user_id,
            content,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the fields present in `update`, leaving the rest untouched.
    pub fn apply(&mut self, update: &PostUpdate) {
        if update.is_empty() {
            return;
        }
        if let Some(content) = &update.content {
            self.content = content.clone();
        }
        if let Some(likes) = &update.likes {
            self.likes = likes.clone();
        }
        if let Some(comments) = &update.comments {
            self.comments = comments.clone();
        }
        self.updated_at = Utc::now().timestamp();
    }

    /// Route of the post's detail page.
    pub fn detail_route(&self) -> String {
        format!("/p/{}", self.id)
    }
}

/// Partial post document, as sent in a PATCH body.
///
/// Absent fields are skipped on the wire, so an update built with only
/// `content` serializes to `{"content": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Validate, Serialize, Deserialize)]
pub struct PostUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<Vec<Uuid>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Uuid>>,
}

impl PostUpdate {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.likes.is_none() && self.comments.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_touches_present_fields() {
        let mut post = Post::new(Uuid::new_v4(), "hello".into());
        let like = Uuid::new_v4();
        post.likes.push(like);

        post.apply(&PostUpdate::content("hello world"));

        assert_eq!(post.content, "hello world");
        assert_eq!(post.likes, vec![like]);
    }

    #[test]
    fn content_only_update_serializes_single_field() {
        let body = serde_json::to_value(PostUpdate::content("hello world")).unwrap();
        assert_eq!(body, serde_json::json!({ "content": "hello world" }));
    }

    #[test]
    fn post_uses_document_id_key() {
        let post = Post::new(Uuid::new_v4(), "hi".into());
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["_id"], post.id.to_string());
        assert!(value.get("id").is_none());
    }

    #[test]
    fn empty_content_fails_validation() {
        assert!(PostUpdate::content("").validate().is_err());
        assert!(PostUpdate::default().validate().is_ok());
    }
}
