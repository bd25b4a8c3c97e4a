use dashmap::{DashMap, mapref::entry::Entry};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Post, PostUpdate, Profile};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Document store behind the handlers.
///
/// Each call touches a single document; there are no multi-document
/// transactions. Lookups that find nothing return `Ok(None)`, not an error.
pub trait DocumentStore: Send + Sync {
    /// Cheap reachability check used by `/health`.
    fn ping(&self) -> Result<(), StoreError>;

    fn insert_post(&self, post: Post) -> Result<(), StoreError>;
    fn find_post(&self, id: Uuid) -> Result<Option<Post>, StoreError>;
    fn list_posts(&self) -> Result<Vec<Post>, StoreError>;
    /// Removes the post and hands back what was removed.
    fn delete_post(&self, id: Uuid) -> Result<Option<Post>, StoreError>;
    /// Applies `update` and returns the document as it was *before* the update.
    fn update_post(&self, id: Uuid, update: &PostUpdate) -> Result<Option<Post>, StoreError>;

    fn insert_profile(&self, profile: Profile) -> Result<(), StoreError>;
    fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, StoreError>;
    fn find_profile_by_email(&self, email: &str) -> Result<Option<Profile>, StoreError>;
    fn list_profiles(&self) -> Result<Vec<Profile>, StoreError>;
}

/// `DashMap` = Thread-safe HashMap
/// - Can be read/written from multiple threads simultaneously
/// - Per-entry locking makes every single-document write atomic
#[derive(Default)]
pub struct MemoryStore {
    posts: DashMap<Uuid, Post>,
    profiles: DashMap<Uuid, Profile>,
    email_index: DashMap<String, Uuid>, // Quick Lookup by Email
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn insert_post(&self, post: Post) -> Result<(), StoreError> {
        self.posts.insert(post.id, post);
        Ok(())
    }

    fn find_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.get(&id).map(|entry| entry.clone()))
    }

    fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self
            .posts
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    fn delete_post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.remove(&id).map(|(_, post)| post))
    }

    fn update_post(&self, id: Uuid, update: &PostUpdate) -> Result<Option<Post>, StoreError> {
        let Some(mut entry) = self.posts.get_mut(&id) else {
            return Ok(None);
        };

        let before = entry.clone();
        entry.apply(update);
        debug!("Post {} updated in place", id);

        Ok(Some(before))
    }

    fn insert_profile(&self, profile: Profile) -> Result<(), StoreError> {
        match self.email_index.entry(profile.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateEmail(profile.email)),
            Entry::Vacant(slot) => {
                slot.insert(profile.id);
                self.profiles.insert(profile.id, profile);
                Ok(())
            }
        }
    }

    fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.get(&id).map(|entry| entry.clone()))
    }

    fn find_profile_by_email(&self, email: &str) -> Result<Option<Profile>, StoreError> {
        let Some(id) = self.email_index.get(email).map(|entry| *entry) else {
            return Ok(None);
        };
        self.find_profile(id)
    }

    fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        Ok(self
            .profiles
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn profile(email: &str) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            username: "maria".into(),
            name: "Maria".into(),
            profile_image_link: None,
            email: email.into(),
            created_at: 0,
        }
    }

    #[test]
    fn update_returns_document_before_change() {
        let store = MemoryStore::new();
        let post = Post::new(Uuid::new_v4(), "hello".into());
        let id = post.id;
        store.insert_post(post).unwrap();

        let before = store
            .update_post(id, &PostUpdate::content("hello world"))
            .unwrap()
            .unwrap();

        assert_eq!(before.content, "hello");
        assert_eq!(store.find_post(id).unwrap().unwrap().content, "hello world");
    }

    #[test]
    fn update_and_delete_of_missing_post_are_none() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert!(store.update_post(id, &PostUpdate::content("x")).unwrap().is_none());
        assert!(store.delete_post(id).unwrap().is_none());
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        store.insert_profile(profile("maria@example.com")).unwrap();

        let err = store.insert_profile(profile("maria@example.com")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail(_)));
        assert_eq!(store.list_profiles().unwrap().len(), 1);
    }

    #[test]
    fn profile_found_by_email() {
        let store = MemoryStore::new();
        let maria = profile("maria@example.com");
        store.insert_profile(maria.clone()).unwrap();

        assert_eq!(store.find_profile_by_email("maria@example.com").unwrap(), Some(maria));
        assert_eq!(store.find_profile_by_email("joao@example.com").unwrap(), None);
    }
}
