use std::fmt;

use dashmap::DashMap;
use tracing::debug;

/// Opaque label attached to a fetch so it can be invalidated later.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheTag(String);

impl CacheTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Tag shared by every profile listing.
    pub fn all_posts() -> Self {
        Self::new("all-posts")
    }

    pub fn user(email: &str) -> Self {
        Self(format!("user-{email}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct CachedResponse {
    body: Vec<u8>,
    tags: Vec<CacheTag>,
}

/// Response bodies keyed by URL, each carrying the tags it was fetched with.
#[derive(Default)]
pub struct TaggedCache {
    entries: DashMap<String, CachedResponse>,
}

impl TaggedCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<Vec<u8>> {
        self.entries.get(url).map(|entry| entry.body.clone())
    }

    pub fn insert(&self, url: String, body: Vec<u8>, tags: Vec<CacheTag>) {
        self.entries.insert(url, CachedResponse { body, tags });
    }

    /// Drops every entry tagged with `tag`. Returns how many were dropped.
    pub fn revalidate(&self, tag: &CacheTag) -> usize {
        let mut dropped = 0;
        self.entries.retain(|_, entry| {
            let keep = !entry.tags.contains(tag);
            if !keep {
                dropped += 1;
            }
            keep
        });
        debug!("Revalidated tag {}: {} entries dropped", tag, dropped);
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revalidate_drops_only_matching_tag() {
        let cache = TaggedCache::new();
        cache.insert("/profiles".into(), b"[]".to_vec(), vec![CacheTag::all_posts()]);
        cache.insert(
            "/profiles/email/a@b.c".into(),
            b"{}".to_vec(),
            vec![CacheTag::user("a@b.c")],
        );

        assert_eq!(cache.revalidate(&CacheTag::all_posts()), 1);
        assert!(cache.get("/profiles").is_none());
        assert_eq!(cache.get("/profiles/email/a@b.c"), Some(b"{}".to_vec()));
    }

    #[test]
    fn user_tag_embeds_email() {
        assert_eq!(CacheTag::user("maria@example.com").as_str(), "user-maria@example.com");
    }
}
