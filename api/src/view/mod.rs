mod post;

pub use post::{Effect, Mode, PostEditor, PostEvent, PostUpdater, PostView, Toast, ViewHost};
