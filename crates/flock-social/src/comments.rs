use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use flock_db::Database;
use flock_db::models::{CommentInsert, CommentRow};
use flock_types::api::CommentRequest;
use flock_types::models::{CommentView, Principal};

use crate::convert;
use crate::error::{SocialError, SocialResult};
use crate::permissions::can_write;

const MAX_COMMENT_LEN: usize = 2_000;

#[derive(Clone)]
pub struct Comments {
    db: Arc<Database>,
}

impl Comments {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn create(
        &self,
        author: &Principal,
        post_id: Uuid,
        req: CommentRequest,
    ) -> SocialResult<CommentView> {
        validate(&req.content)?;
        let post = self
            .db
            .get_post(&post_id.to_string())?
            .ok_or(SocialError::NotFound("Post"))?;

        let id = Uuid::new_v4().to_string();
        let author_id = author.id.to_string();
        if self.db.insert_comment(&id, &post.id, &author_id, &req.content)?
            == CommentInsert::PostMissing
        {
            debug!("Post {} was deleted before {}'s comment landed", post.id, author.username);
            return Err(SocialError::NotFound("Post"));
        }
        info!("{} commented on post {}", author.username, post.id);

        self.resolve(&id).map(convert::comment_view)
    }

    /// Comments on a post, oldest first.
    pub fn list(&self, post_id: Uuid) -> SocialResult<Vec<CommentView>> {
        let post = self
            .db
            .get_post(&post_id.to_string())?
            .ok_or(SocialError::NotFound("Post"))?;
        let rows = self.db.list_comments(&post.id)?;
        Ok(rows.into_iter().map(convert::comment_view).collect())
    }

    pub fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        req: CommentRequest,
    ) -> SocialResult<CommentView> {
        let row = self.resolve(&id.to_string())?;
        if !can_write(Some(principal), &row) {
            return Err(SocialError::Forbidden);
        }
        validate(&req.content)?;

        if !self.db.update_comment(&row.id, &req.content)? {
            return Err(SocialError::NotFound("Comment"));
        }
        self.resolve(&row.id).map(convert::comment_view)
    }

    pub fn delete(&self, principal: &Principal, id: Uuid) -> SocialResult<()> {
        let row = self.resolve(&id.to_string())?;
        if !can_write(Some(principal), &row) {
            return Err(SocialError::Forbidden);
        }

        if !self.db.delete_comment(&row.id)? {
            return Err(SocialError::NotFound("Comment"));
        }
        info!("{} deleted comment {}", principal.username, row.id);
        Ok(())
    }

    fn resolve(&self, id: &str) -> SocialResult<CommentRow> {
        self.db.get_comment(id)?.ok_or(SocialError::NotFound("Comment"))
    }
}

fn validate(content: &str) -> SocialResult<()> {
    if content.trim().is_empty() || content.chars().count() > MAX_COMMENT_LEN {
        return Err(SocialError::Validation(format!(
            "Comment must be between 1 and {} characters.",
            MAX_COMMENT_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{post, social, user};

    fn comment(content: &str) -> CommentRequest {
        CommentRequest {
            content: content.to_string(),
        }
    }

    #[test]
    fn lists_oldest_first() {
        let (db, social) = social();
        let alice = user(&db, "alice");
        let bob = user(&db, "bob");
        let p = post(&social, &bob, "p");

        social.comments.create(&alice, p.id, comment("first")).unwrap();
        social.comments.create(&bob, p.id, comment("second")).unwrap();

        let list = social.comments.list(p.id).unwrap();
        let contents: Vec<_> = list.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
        assert_eq!(list[0].author_username, "alice");
    }

    #[test]
    fn only_author_edits() {
        let (db, social) = social();
        let alice = user(&db, "alice");
        let bob = user(&db, "bob");
        let p = post(&social, &bob, "p");
        let c = social.comments.create(&alice, p.id, comment("hi")).unwrap();

        assert!(matches!(
            social.comments.update(&bob, c.id, comment("edited")),
            Err(SocialError::Forbidden)
        ));
        assert!(matches!(social.comments.delete(&bob, c.id), Err(SocialError::Forbidden)));

        let edited = social.comments.update(&alice, c.id, comment("edited")).unwrap();
        assert_eq!(edited.content, "edited");
        social.comments.delete(&alice, c.id).unwrap();
        assert!(social.comments.list(p.id).unwrap().is_empty());
    }

    #[test]
    fn comment_on_missing_post() {
        let (db, social) = social();
        let alice = user(&db, "alice");

        let err = social.comments.create(&alice, Uuid::new_v4(), comment("hi")).unwrap_err();
        assert!(matches!(err, SocialError::NotFound("Post")));
    }

    #[test]
    fn empty_comment_is_invalid() {
        let (db, social) = social();
        let alice = user(&db, "alice");
        let p = post(&social, &alice, "p");

        let err = social.comments.create(&alice, p.id, comment("  ")).unwrap_err();
        assert!(matches!(err, SocialError::Validation(_)));
    }
}
