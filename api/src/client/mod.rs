//! HTTP client for the social API
//!
//! Profile lookups are tagged and cached until their tag is revalidated.
//! Nothing here retries or times out; transport and status errors reach the
//! caller as the underlying `reqwest::Error`.

mod cache;

pub use cache::{CacheTag, TaggedCache};

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    models::{Post, PostUpdate, Profile},
    view::PostUpdater,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base url {0:?}")]
    InvalidBaseUrl(String),
}

pub struct ApiClient {
    http: Client,
    base_url: Url,
    cache: TaggedCache,
}

impl ApiClient {
    /// `base_url` is the API root, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url).map_err(|_| ClientError::InvalidBaseUrl(base_url.into()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.into()));
        }

        Ok(Self {
            http: Client::new(),
            base_url: base,
            cache: TaggedCache::new(),
        })
    }

    /// GET {base}/profiles, tagged `all-posts`
    pub async fn get_users(&self) -> Result<Vec<Profile>, ClientError> {
        let url = self.endpoint(&["profiles"])?;
        self.fetch_tagged(url, vec![CacheTag::all_posts()]).await
    }

    /// GET {base}/profiles/email/{email}, tagged `user-{email}`
    pub async fn get_user_by_email(&self, email: &str) -> Result<Profile, ClientError> {
        let url = self.endpoint(&["profiles", "email", email])?;
        self.fetch_tagged(url, vec![CacheTag::user(email)]).await
    }

    /// PATCH {base}/posts/{id}
    ///
    /// The server answers with the post as it was before the update.
    pub async fn update_post(&self, id: Uuid, update: &PostUpdate) -> Result<Post, ClientError> {
        let url = self.endpoint(&["posts", &id.to_string()])?;

        info!("Updating post {}", id);

        let post = self
            .http
            .patch(url)
            .json(update)
            .send()
            .await?
            .error_for_status()?
            .json::<Post>()
            .await?;

        Ok(post)
    }

    /// Forgets every cached response fetched with `tag`.
    pub fn revalidate_tag(&self, tag: &CacheTag) -> usize {
        self.cache.revalidate(tag)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch_tagged<T: DeserializeOwned>(
        &self,
        url: Url,
        tags: Vec<CacheTag>,
    ) -> Result<T, ClientError> {
        if let Some(body) = self.cache.get(url.as_str()) {
            debug!("Cache hit: {}", url);
            return Ok(serde_json::from_slice(&body)?);
        }

        let body = self
            .http
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let value = serde_json::from_slice(&body)?;
        self.cache.insert(url.into(), body.to_vec(), tags);

        Ok(value)
    }
}

impl PostUpdater for ApiClient {
    type Error = ClientError;

    async fn send_update(&self, id: Uuid, update: PostUpdate) -> Result<(), ClientError> {
        self.update_post(id, &update).await.map(|_| ())
    }
}
