use crate::store::DocumentStore;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::{num::NonZeroU32, sync::Arc};

// ============================================================================
// APPLICATION STATE - Shared data across all requests
// ============================================================================
/// `Arc` = Atomic Reference Counter
/// - Allows multiple threads to share ownership safely
/// - When last reference drops, data is cleaned up
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub limiter: Arc<DefaultDirectRateLimiter>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, requests_per_second: NonZeroU32) -> Self {
        Self {
            store,
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(requests_per_second))),
        }
    }
}
