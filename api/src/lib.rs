// ============================================================================
// SOCIAL API - posts, profiles and the post view core
// ============================================================================

// - Post resource: fetch, update (returns the pre-update document), delete
// - Profile directory with lookup by email
// - Tag-cached profile client
// - Post view display/edit state machine
// - Rate limiting, CORS, structured logging

pub mod client;
pub mod config;
pub mod dto;
pub mod errors;
pub mod models;
pub mod routes;
pub mod states;
pub mod store;
pub mod view;

pub use states::AppState;
