use std::sync::Arc;

use tracing::debug;

use flock_db::Database;
use flock_types::models::{Page, PostView, Principal};

use crate::convert;
use crate::error::SocialResult;
use crate::pagination::PageRequest;

/// Reverse-chronological posts by the authors a principal follows.
/// Computed fresh on every call, nothing is cached or precomputed.
#[derive(Clone)]
pub struct FeedService {
    db: Arc<Database>,
}

impl FeedService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn get_feed(
        &self,
        principal: &Principal,
        page: PageRequest,
    ) -> SocialResult<Page<PostView>> {
        let follower_id = principal.id.to_string();

        let count = self.db.count_feed_posts(&follower_id)?;
        if count == 0 {
            return Ok(page.into_page(0, Vec::new()));
        }

        let rows = self.db.feed_posts(&follower_id, page.size(), page.offset())?;
        debug!(
            "Feed for {}: page {} ({} of {} posts)",
            principal.username,
            page.page(),
            rows.len(),
            count
        );

        Ok(page.into_page(count, rows.into_iter().map(convert::post_view).collect()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::test_support::{post, social, user};

    #[test]
    fn empty_following_yields_empty_page() {
        let (db, social) = social();
        let alice = user(&db, "alice");
        let bob = user(&db, "bob");
        post(&social, &bob, "unseen");

        let page = social.feed.get_feed(&alice, PageRequest::first()).unwrap();
        assert_eq!(page.count, 0);
        assert!(page.results.is_empty());
        assert_eq!(page.next, None);
    }

    #[test]
    fn newest_first_from_followed_authors_only() {
        let (db, social) = social();
        let alice = user(&db, "alice");
        let bob = user(&db, "bob");
        let carol = user(&db, "carol");

        social.follows.follow(&alice, bob.id).unwrap();
        let p1 = post(&social, &bob, "p1");
        post(&social, &carol, "not followed");
        let p2 = post(&social, &bob, "p2");
        post(&social, &alice, "own post");

        let page = social.feed.get_feed(&alice, PageRequest::first()).unwrap();
        let ids: Vec<_> = page.results.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![p2.id, p1.id]);
        assert_eq!(page.count, 2);
    }

    #[test]
    fn pages_cover_every_post_once() {
        let (db, social) = social();
        let alice = user(&db, "alice");
        let bob = user(&db, "bob");
        social.follows.follow(&alice, bob.id).unwrap();
        for i in 0..25 {
            post(&social, &bob, &format!("post {i}"));
        }

        let mut seen = HashSet::new();
        let mut sizes = Vec::new();
        for n in 1..=3 {
            let page = social.feed.get_feed(&alice, PageRequest::new(n, 10)).unwrap();
            sizes.push(page.results.len());
            for p in page.results {
                assert!(seen.insert(p.id), "post {} repeated", p.id);
            }
        }

        assert_eq!(sizes, vec![10, 10, 5]);
        assert_eq!(seen.len(), 25);
    }

    #[test]
    fn unfollowed_authors_drop_out() {
        let (db, social) = social();
        let alice = user(&db, "alice");
        let bob = user(&db, "bob");
        social.follows.follow(&alice, bob.id).unwrap();
        post(&social, &bob, "p1");

        social.follows.unfollow(&alice, bob.id).unwrap();
        let page = social.feed.get_feed(&alice, PageRequest::first()).unwrap();
        assert!(page.results.is_empty());
    }
}
