use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shown when a profile has no image of its own.
pub const DEFAULT_AVATAR_URL: &str = "https://static.social.local/avatars/default.jpg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub profile_image_link: Option<String>,
    pub email: String,
    pub created_at: i64,
}

impl Profile {
    pub fn avatar_url(&self) -> &str {
        self.profile_image_link
            .as_deref()
            .unwrap_or(DEFAULT_AVATAR_URL)
    }

    pub fn route(&self) -> String {
        format!("/u/{}", self.username)
    }
}
