use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use flock_db::Database;
use flock_db::models::{LikeInsert, NewNotification, PostRow};
use flock_types::api::Detail;
use flock_types::models::Principal;

use crate::error::{SocialError, SocialResult};

pub const VERB_LIKED: &str = "liked";

/// Likes on posts.
///
/// Unlike follows, a like already in the requested state is reported:
/// liking twice is `AlreadyLiked`, unliking with no like is `LikeNotFound`.
#[derive(Clone)]
pub struct Interactions {
    db: Arc<Database>,
}

impl Interactions {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Record a like and notify the post's author, atomically.
    /// Liking your own post records the like without a notification.
    pub fn like(&self, principal: &Principal, post_id: Uuid) -> SocialResult<Detail> {
        let post = self.resolve(post_id)?;

        let like_id = Uuid::new_v4().to_string();
        let notification_id = Uuid::new_v4().to_string();
        let actor_id = principal.id.to_string();

        let notification = (post.author_id != actor_id).then(|| NewNotification {
            id: &notification_id,
            recipient_id: &post.author_id,
            actor_id: &actor_id,
            verb: VERB_LIKED,
            target_id: &post.id,
        });
        let notifies = notification.is_some();

        match self.db.insert_like(&like_id, &actor_id, &post.id, notification)? {
            LikeInsert::Created => {
                info!(
                    "{} liked post {} (notified author: {})",
                    principal.username, post.id, notifies
                );
                Ok(Detail::new("Post liked."))
            }
            LikeInsert::Duplicate => {
                debug!("{} already liked post {}", principal.username, post.id);
                Err(SocialError::AlreadyLiked)
            }
            LikeInsert::PostMissing => {
                debug!("Post {} was deleted before {}'s like landed", post.id, principal.username);
                Err(SocialError::NotFound("Post"))
            }
        }
    }

    /// Remove a like. Notifications already sent stay.
    pub fn unlike(&self, principal: &Principal, post_id: Uuid) -> SocialResult<Detail> {
        let post = self.resolve(post_id)?;

        if !self.db.delete_like(&principal.id.to_string(), &post.id)? {
            return Err(SocialError::LikeNotFound);
        }

        info!("{} unliked post {}", principal.username, post.id);
        Ok(Detail::new("Post unliked."))
    }

    pub fn like_count(&self, post_id: Uuid) -> SocialResult<u64> {
        let post = self.resolve(post_id)?;
        Ok(self.db.count_likes(&post.id)?)
    }

    fn resolve(&self, post_id: Uuid) -> SocialResult<PostRow> {
        self.db
            .get_post(&post_id.to_string())?
            .ok_or(SocialError::NotFound("Post"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageRequest;
    use crate::test_support::{post, social, user};

    #[test]
    fn second_like_is_already_liked() {
        let (db, social) = social();
        let alice = user(&db, "alice");
        let bob = user(&db, "bob");
        let p = post(&social, &bob, "p");

        assert_eq!(social.interactions.like(&alice, p.id).unwrap().detail, "Post liked.");
        let err = social.interactions.like(&alice, p.id).unwrap_err();
        assert!(matches!(err, SocialError::AlreadyLiked));
        assert_eq!(social.interactions.like_count(p.id).unwrap(), 1);
    }

    #[test]
    fn like_notifies_author_once() {
        let (db, social) = social();
        let alice = user(&db, "alice");
        let bob = user(&db, "bob");
        let p = post(&social, &bob, "p");

        social.interactions.like(&alice, p.id).unwrap();
        let _ = social.interactions.like(&alice, p.id);

        let notes = social.notifications.list(&bob, false).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].actor_id, alice.id);
        assert_eq!(notes[0].recipient_id, bob.id);
        assert_eq!(notes[0].verb, VERB_LIKED);
        assert_eq!(notes[0].target_id, p.id);
        assert!(social.notifications.list(&alice, false).unwrap().is_empty());
    }

    #[test]
    fn liking_own_post_does_not_notify() {
        let (db, social) = social();
        let bob = user(&db, "bob");
        let p = post(&social, &bob, "p");

        social.interactions.like(&bob, p.id).unwrap();
        assert_eq!(social.interactions.like_count(p.id).unwrap(), 1);
        assert!(social.notifications.list(&bob, false).unwrap().is_empty());
    }

    #[test]
    fn unlike_without_like_is_like_not_found() {
        let (db, social) = social();
        let alice = user(&db, "alice");
        let bob = user(&db, "bob");
        let p = post(&social, &bob, "p");

        let err = social.interactions.unlike(&alice, p.id).unwrap_err();
        assert!(matches!(err, SocialError::LikeNotFound));
    }

    #[test]
    fn missing_post_is_not_found() {
        let (db, social) = social();
        let alice = user(&db, "alice");

        let like = social.interactions.like(&alice, Uuid::new_v4()).unwrap_err();
        let unlike = social.interactions.unlike(&alice, Uuid::new_v4()).unwrap_err();
        assert!(matches!(like, SocialError::NotFound("Post")));
        assert!(matches!(unlike, SocialError::NotFound("Post")));
    }

    #[test]
    fn unlike_keeps_notification() {
        let (db, social) = social();
        let alice = user(&db, "alice");
        let bob = user(&db, "bob");
        let p = post(&social, &bob, "p");

        social.interactions.like(&alice, p.id).unwrap();
        social.interactions.unlike(&alice, p.id).unwrap();

        assert_eq!(social.interactions.like_count(p.id).unwrap(), 0);
        assert_eq!(social.notifications.list(&bob, false).unwrap().len(), 1);
    }

    #[test]
    fn alice_and_bob_scenario() {
        let (db, social) = social();
        let alice = user(&db, "alice");
        let bob = user(&db, "bob");

        social.follows.follow(&alice, bob.id).unwrap();
        let p1 = post(&social, &bob, "p1");
        let p2 = post(&social, &bob, "p2");

        let feed = social.feed.get_feed(&alice, PageRequest::first()).unwrap();
        let ids: Vec<_> = feed.results.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![p2.id, p1.id]);

        social.interactions.like(&alice, p1.id).unwrap();
        assert_eq!(social.notifications.list(&bob, false).unwrap().len(), 1);

        assert!(matches!(
            social.interactions.like(&alice, p1.id),
            Err(SocialError::AlreadyLiked)
        ));
        social.interactions.unlike(&alice, p1.id).unwrap();
        assert!(matches!(
            social.interactions.unlike(&alice, p1.id),
            Err(SocialError::LikeNotFound)
        ));
    }
}
