use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use flock_db::Database;
use flock_db::models::UserRow;
use flock_types::api::Detail;
use flock_types::models::{FollowStats, Principal, UserSummary};

use crate::convert;
use crate::error::{SocialError, SocialResult};

/// The directed follow relation between users.
///
/// Follow and unfollow are idempotent: an edge already in the requested state
/// is a success, not an error.
#[derive(Clone)]
pub struct FollowGraph {
    db: Arc<Database>,
}

impl FollowGraph {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn follow(&self, follower: &Principal, followee_id: Uuid) -> SocialResult<Detail> {
        let followee = self.resolve(followee_id)?;
        if followee_id == follower.id {
            return Err(SocialError::SelfFollow);
        }

        let inserted = self.db.insert_follow(&follower.id.to_string(), &followee.id)?;
        if inserted {
            info!("{} followed {}", follower.username, followee.username);
        } else {
            debug!("{} already follows {}", follower.username, followee.username);
        }

        Ok(Detail::new(format!("You are now following {}.", followee.username)))
    }

    pub fn unfollow(&self, follower: &Principal, followee_id: Uuid) -> SocialResult<Detail> {
        let followee = self.resolve(followee_id)?;

        let removed = self.db.delete_follow(&follower.id.to_string(), &followee.id)?;
        if removed {
            info!("{} unfollowed {}", follower.username, followee.username);
        } else {
            debug!("{} was not following {}", follower.username, followee.username);
        }

        Ok(Detail::new(format!("You have unfollowed {}.", followee.username)))
    }

    pub fn followers_count(&self, user_id: Uuid) -> SocialResult<u64> {
        Ok(self.db.count_followers(&user_id.to_string())?)
    }

    pub fn following_count(&self, user_id: Uuid) -> SocialResult<u64> {
        Ok(self.db.count_following(&user_id.to_string())?)
    }

    pub fn stats(&self, user_id: Uuid) -> SocialResult<FollowStats> {
        let user = self.resolve(user_id)?;
        Ok(FollowStats {
            id: user_id,
            username: user.username,
            followers_count: self.followers_count(user_id)?,
            following_count: self.following_count(user_id)?,
        })
    }

    /// Users following `user_id`, in the order they followed.
    pub fn followers(&self, user_id: Uuid) -> SocialResult<Vec<UserSummary>> {
        let user = self.resolve(user_id)?;
        let rows = self.db.list_followers(&user.id)?;
        Ok(rows.into_iter().map(convert::user_summary).collect())
    }

    /// Users `user_id` follows, in the order they were followed.
    pub fn following(&self, user_id: Uuid) -> SocialResult<Vec<UserSummary>> {
        let user = self.resolve(user_id)?;
        let rows = self.db.list_following(&user.id)?;
        Ok(rows.into_iter().map(convert::user_summary).collect())
    }

    fn resolve(&self, user_id: Uuid) -> SocialResult<UserRow> {
        self.db
            .get_user_by_id(&user_id.to_string())?
            .ok_or(SocialError::NotFound("User"))
    }
}
