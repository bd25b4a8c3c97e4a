use std::fmt;

use tracing::warn;
use uuid::Uuid;

use crate::models::{Post, PostUpdate, Profile};

pub const UPDATING_MESSAGE: &str = "Updating post...";
pub const UPDATED_MESSAGE: &str = "Post updated!";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update post!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Display,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostEvent {
    /// Edit picked from the post menu.
    EditRequested { viewer: Uuid },
    /// Save pressed with the text currently in the editor.
    Save { text: String },
    /// The post body was clicked while on `current_route`.
    Clicked { current_route: String },
}

/// What the host has to do after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Navigate(String),
    Update(PostUpdate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toast {
    Loading(String),
    Success(String),
    Error(String),
}

/// Side effects the surrounding UI performs for a post view.
pub trait ViewHost {
    fn navigate(&self, route: &str);
    fn toast(&self, toast: Toast);
    /// Ask the enclosing view to re-fetch and re-render.
    fn refresh(&self);
}

/// Sends a partial post update to the server.
pub trait PostUpdater {
    type Error: fmt::Display;

    fn send_update(
        &self,
        id: Uuid,
        update: PostUpdate,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// A single post with its author, in display or edit mode.
///
/// The mode only changes through [`PostView::handle`].
#[derive(Debug, Clone)]
pub struct PostView {
    post: Post,
    author: Profile,
    mode: Mode,
}

impl PostView {
    pub fn new(post: Post, author: Profile) -> Self {
        Self {
            post,
            author,
            mode: Mode::Display,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn avatar_url(&self) -> &str {
        self.author.avatar_url()
    }

    pub fn author_route(&self) -> String {
        self.author.route()
    }

    /// Only the author is offered the edit menu.
    pub fn can_edit(&self, viewer: Uuid) -> bool {
        viewer == self.post.user_id
    }

    /// Swaps in the re-fetched document after a refresh.
    pub fn refreshed(&mut self, post: Post) {
        self.post = post;
    }

    pub fn handle(&mut self, event: PostEvent) -> Option<Effect> {
        match (self.mode, event) {
            (Mode::Display, PostEvent::EditRequested { viewer }) if self.can_edit(viewer) => {
                self.mode = Mode::Edit;
                None
            }
            (Mode::Edit, PostEvent::Save { text }) => {
                self.mode = Mode::Display;
                (text != self.post.content).then(|| Effect::Update(PostUpdate::content(text)))
            }
            (Mode::Display, PostEvent::Clicked { current_route }) => {
                let route = self.post.detail_route();
                (route != current_route).then_some(Effect::Navigate(route))
            }
            _ => None,
        }
    }
}

/// Drives a [`PostView`], running its effects against the host and server.
pub struct PostEditor<U, H> {
    view: PostView,
    updater: U,
    host: H,
}

impl<U: PostUpdater, H: ViewHost> PostEditor<U, H> {
    pub fn new(view: PostView, updater: U, host: H) -> Self {
        Self {
            view,
            updater,
            host,
        }
    }

    pub fn view(&self) -> &PostView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut PostView {
        &mut self.view
    }

    pub async fn dispatch(&mut self, event: PostEvent) {
        match self.view.handle(event) {
            None => {}
            Some(Effect::Navigate(route)) => self.host.navigate(&route),
            Some(Effect::Update(update)) => self.save(update).await,
        }
    }

    async fn save(&mut self, update: PostUpdate) {
        self.host.toast(Toast::Loading(UPDATING_MESSAGE.into()));

        match self.updater.send_update(self.view.post.id, update.clone()).await {
            Ok(()) => {
                // Keep the local copy in line with the server until the refresh lands.
                self.view.post.apply(&update);
                self.host.refresh();
                self.host.toast(Toast::Success(UPDATED_MESSAGE.into()));
            }
            Err(e) => {
                warn!("Post update failed for {}: {}", self.view.post.id, e);
                self.host.toast(Toast::Error(UPDATE_FAILED_MESSAGE.into()));
            }
        }
    }
}
