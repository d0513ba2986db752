//! Owner-or-read-only checks, evaluated before any write to a post or comment.

use flock_db::models::{CommentRow, PostRow};
use flock_types::models::Principal;

/// Anything with a single owning user.
pub trait Owned {
    fn owner_id(&self) -> &str;
}

impl Owned for PostRow {
    fn owner_id(&self) -> &str {
        &self.author_id
    }
}

impl Owned for CommentRow {
    fn owner_id(&self) -> &str {
        &self.author_id
    }
}

/// Everything is readable, authenticated or not.
pub fn can_read<T: Owned>(_principal: Option<&Principal>, _obj: &T) -> bool {
    true
}

/// Only the owner may modify or delete.
pub fn can_write<T: Owned>(principal: Option<&Principal>, obj: &T) -> bool {
    principal.is_some_and(|p| p.id.to_string() == obj.owner_id())
}
