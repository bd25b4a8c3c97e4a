mod requests;
mod responses;

pub use requests::{CreatePostRequest, CreateProfileRequest};
pub use responses::{DeleteResponse, PaginatedResponse, PaginationParams};
