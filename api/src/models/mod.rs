mod post;
mod profile;

pub use post::{Post, PostUpdate};
pub use profile::{DEFAULT_AVATAR_URL, Profile};
