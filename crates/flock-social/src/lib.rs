//! Social core: follow graph, feed, likes and the notification side effect,
//! plus the post/comment/profile operations around them.
//!
//! Every operation takes the acting [`Principal`] explicitly and talks to the
//! store through [`flock_db::Database`]. Storage calls are blocking; callers on
//! an async runtime should run them on a blocking thread.

pub mod comments;
pub mod error;
pub mod feed;
pub mod follow;
pub mod interaction;
pub mod notifications;
pub mod pagination;
pub mod permissions;
pub mod posts;
pub mod profiles;

mod convert;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use flock_db::Database;

pub use error::{SocialError, SocialResult};
pub use flock_types::models::Principal;

use comments::Comments;
use feed::FeedService;
use follow::FollowGraph;
use interaction::Interactions;
use notifications::Notifications;
use posts::Posts;
use profiles::Profiles;

/// All services over one shared database handle.
#[derive(Clone)]
pub struct Social {
    pub follows: FollowGraph,
    pub feed: FeedService,
    pub interactions: Interactions,
    pub posts: Posts,
    pub comments: Comments,
    pub profiles: Profiles,
    pub notifications: Notifications,
}

impl Social {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            follows: FollowGraph::new(db.clone()),
            feed: FeedService::new(db.clone()),
            interactions: Interactions::new(db.clone()),
            posts: Posts::new(db.clone()),
            comments: Comments::new(db.clone()),
            profiles: Profiles::new(db.clone()),
            notifications: Notifications::new(db),
        }
    }
}
