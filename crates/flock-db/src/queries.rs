use crate::models::{
    CommentInsert, CommentRow, LikeInsert, NewNotification, NewUser, NotificationRow, PostOrder,
    PostRow, UserInsert, UserRow, UserSummaryRow,
};
use crate::{Database, now_timestamp};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row, params};

const USER_COLUMNS: &str = "id, username, email, password, bio, profile_picture, created_at";

// Author username and like count are joined in so listings stay a single query.
const POST_SELECT: &str = "SELECT p.id, p.author_id, u.username, p.title, p.content,
            (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id),
            p.created_at, p.updated_at
     FROM posts p
     JOIN users u ON u.id = p.author_id";

const COMMENT_SELECT: &str = "SELECT c.id, c.post_id, c.author_id, u.username, c.content,
            c.created_at, c.updated_at
     FROM comments c
     JOIN users u ON u.id = c.author_id";

const NOTIFICATION_SELECT: &str = "SELECT n.id, n.recipient_id, n.actor_id, u.username, n.verb,
            n.target_id, n.read, n.created_at
     FROM notifications n
     JOIN users u ON u.id = n.actor_id";

impl Database {
    // -- Users --

    pub fn create_user(&self, user: &NewUser<'_>) -> Result<UserInsert> {
        self.with_conn_mut(|conn| {
            let inserted = conn.execute(
                "INSERT INTO users (id, username, email, password, bio, profile_picture, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    user.id,
                    user.username,
                    user.email,
                    user.password_hash,
                    user.bio,
                    user.profile_picture,
                    now_timestamp(),
                ],
            );

            match inserted {
                Ok(_) => Ok(UserInsert::Created),
                Err(e) if is_unique_violation(&e) => Ok(UserInsert::UsernameTaken),
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1");
            Ok(conn.query_row(&sql, [username], read_user).optional()?)
        })
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
            Ok(conn.query_row(&sql, [id], read_user).optional()?)
        })
    }

    /// Update the profile fields that are `Some`; `None` leaves a field as is.
    /// An empty `email` or `profile_picture` clears it to NULL.
    /// Returns false if the user does not exist.
    pub fn update_profile(
        &self,
        id: &str,
        email: Option<&str>,
        bio: Option<&str>,
        profile_picture: Option<&str>,
    ) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE users
                 SET email = CASE WHEN ?2 IS NULL THEN email ELSE NULLIF(?2, '') END,
                     bio = COALESCE(?3, bio),
                     profile_picture =
                         CASE WHEN ?4 IS NULL THEN profile_picture ELSE NULLIF(?4, '') END
                 WHERE id = ?1",
                params![id, email, bio, profile_picture],
            )?;
            Ok(changed > 0)
        })
    }

    // -- Follows --

    /// Insert a follow edge. Returns false when the edge already existed;
    /// the primary key on (follower_id, followee_id) decides, not a prior read.
    pub fn insert_follow(&self, follower_id: &str, followee_id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let inserted = conn.execute(
                "INSERT INTO follows (follower_id, followee_id, created_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT (follower_id, followee_id) DO NOTHING",
                params![follower_id, followee_id, now_timestamp()],
            )?;
            Ok(inserted > 0)
        })
    }

    /// Returns false when there was no edge to remove.
    pub fn delete_follow(&self, follower_id: &str, followee_id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let removed = conn.execute(
                "DELETE FROM follows WHERE follower_id = ?1 AND followee_id = ?2",
                params![follower_id, followee_id],
            )?;
            Ok(removed > 0)
        })
    }

    pub fn count_followers(&self, user_id: &str) -> Result<u64> {
        self.with_conn(|conn| {
            let n: i64 = conn.query_row(
                "SELECT COUNT(*) FROM follows WHERE followee_id = ?1",
                [user_id],
                |row| row.get(0),
            )?;
            Ok(n as u64)
        })
    }

    pub fn count_following(&self, user_id: &str) -> Result<u64> {
        self.with_conn(|conn| {
            let n: i64 = conn.query_row(
                "SELECT COUNT(*) FROM follows WHERE follower_id = ?1",
                [user_id],
                |row| row.get(0),
            )?;
            Ok(n as u64)
        })
    }

    pub fn list_followers(&self, user_id: &str) -> Result<Vec<UserSummaryRow>> {
        self.with_conn(|conn| {
            query_user_summaries(
                conn,
                "SELECT u.id, u.username FROM follows f
                 JOIN users u ON u.id = f.follower_id
                 WHERE f.followee_id = ?1
                 ORDER BY f.rowid",
                user_id,
            )
        })
    }

    pub fn list_following(&self, user_id: &str) -> Result<Vec<UserSummaryRow>> {
        self.with_conn(|conn| {
            query_user_summaries(
                conn,
                "SELECT u.id, u.username FROM follows f
                 JOIN users u ON u.id = f.followee_id
                 WHERE f.follower_id = ?1
                 ORDER BY f.rowid",
                user_id,
            )
        })
    }

    // -- Posts --

    pub fn insert_post(&self, id: &str, author_id: &str, title: &str, content: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            let now = now_timestamp();
            conn.execute(
                "INSERT INTO posts (id, author_id, title, content, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![id, author_id, title, content, now],
            )?;
            Ok(())
        })
    }

    pub fn get_post(&self, id: &str) -> Result<Option<PostRow>> {
        self.with_conn(|conn| {
            let sql = format!("{POST_SELECT} WHERE p.id = ?1");
            Ok(conn.query_row(&sql, [id], read_post).optional()?)
        })
    }

    /// List posts, optionally filtered by a case-insensitive substring of title or content.
    pub fn list_posts(
        &self,
        search: Option<&str>,
        order: PostOrder,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<PostRow>> {
        let pattern = search.map(like_pattern);
        self.with_conn(|conn| {
            let sql = format!(
                "{POST_SELECT}
                 WHERE ?1 IS NULL OR p.title LIKE ?1 ESCAPE '\\' OR p.content LIKE ?1 ESCAPE '\\'
                 ORDER BY {}
                 LIMIT ?2 OFFSET ?3",
                order.order_by()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params![pattern, limit, offset as i64], read_post)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn count_posts(&self, search: Option<&str>) -> Result<u64> {
        let pattern = search.map(like_pattern);
        self.with_conn(|conn| {
            let n: i64 = conn.query_row(
                "SELECT COUNT(*) FROM posts p
                 WHERE ?1 IS NULL OR p.title LIKE ?1 ESCAPE '\\' OR p.content LIKE ?1 ESCAPE '\\'",
                params![pattern],
                |row| row.get(0),
            )?;
            Ok(n as u64)
        })
    }

    /// Returns false if the post does not exist.
    pub fn update_post(
        &self,
        id: &str,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE posts
                 SET title = COALESCE(?2, title),
                     content = COALESCE(?3, content),
                     updated_at = ?4
                 WHERE id = ?1",
                params![id, title, content, now_timestamp()],
            )?;
            Ok(changed > 0)
        })
    }

    /// Deletes the post; comments, likes and notifications cascade.
    pub fn delete_post(&self, id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let removed = conn.execute("DELETE FROM posts WHERE id = ?1", [id])?;
            Ok(removed > 0)
        })
    }

    // -- Feed --

    /// Posts by everyone `follower_id` follows, newest first. `rowid` breaks
    /// timestamp ties so consecutive pages neither skip nor repeat a post.
    pub fn feed_posts(&self, follower_id: &str, limit: u32, offset: u64) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "{POST_SELECT}
                 JOIN follows f ON f.followee_id = p.author_id
                 WHERE f.follower_id = ?1
                 ORDER BY p.created_at DESC, p.rowid DESC
                 LIMIT ?2 OFFSET ?3"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params![follower_id, limit, offset as i64], read_post)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn count_feed_posts(&self, follower_id: &str) -> Result<u64> {
        self.with_conn(|conn| {
            let n: i64 = conn.query_row(
                "SELECT COUNT(*) FROM posts p
                 JOIN follows f ON f.followee_id = p.author_id
                 WHERE f.follower_id = ?1",
                [follower_id],
                |row| row.get(0),
            )?;
            Ok(n as u64)
        })
    }

    // -- Comments --

    /// A post deleted before the insert lands trips the foreign key and
    /// yields `CommentInsert::PostMissing`.
    pub fn insert_comment(
        &self,
        id: &str,
        post_id: &str,
        author_id: &str,
        content: &str,
    ) -> Result<CommentInsert> {
        self.with_conn_mut(|conn| {
            let now = now_timestamp();
            let inserted = conn.execute(
                "INSERT INTO comments (id, post_id, author_id, content, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![id, post_id, author_id, content, now],
            );

            match inserted {
                Ok(_) => Ok(CommentInsert::Created),
                Err(e) if is_foreign_key_violation(&e) => Ok(CommentInsert::PostMissing),
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn get_comment(&self, id: &str) -> Result<Option<CommentRow>> {
        self.with_conn(|conn| {
            let sql = format!("{COMMENT_SELECT} WHERE c.id = ?1");
            Ok(conn.query_row(&sql, [id], read_comment).optional()?)
        })
    }

    /// Oldest first.
    pub fn list_comments(&self, post_id: &str) -> Result<Vec<CommentRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "{COMMENT_SELECT}
                 WHERE c.post_id = ?1
                 ORDER BY c.created_at ASC, c.rowid ASC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([post_id], read_comment)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn update_comment(&self, id: &str, content: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE comments SET content = ?2, updated_at = ?3 WHERE id = ?1",
                params![id, content, now_timestamp()],
            )?;
            Ok(changed > 0)
        })
    }

    pub fn delete_comment(&self, id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let removed = conn.execute("DELETE FROM comments WHERE id = ?1", [id])?;
            Ok(removed > 0)
        })
    }

    // -- Likes --

    /// Insert a like and, if given, its notification in one transaction.
    /// A UNIQUE(user_id, post_id) violation yields `LikeInsert::Duplicate` and a
    /// post deleted in the meantime yields `LikeInsert::PostMissing`, both with
    /// nothing written. A failed notification insert rolls back the like.
    pub fn insert_like(
        &self,
        id: &str,
        user_id: &str,
        post_id: &str,
        notification: Option<NewNotification<'_>>,
    ) -> Result<LikeInsert> {
        self.with_tx(|tx| {
            let now = now_timestamp();
            let inserted = tx.execute(
                "INSERT INTO likes (id, user_id, post_id, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![id, user_id, post_id, now],
            );

            match inserted {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => return Ok(LikeInsert::Duplicate),
                Err(e) if is_foreign_key_violation(&e) => return Ok(LikeInsert::PostMissing),
                Err(e) => return Err(e.into()),
            }

            if let Some(n) = notification {
                tx.execute(
                    "INSERT INTO notifications
                         (id, recipient_id, actor_id, verb, target_id, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![n.id, n.recipient_id, n.actor_id, n.verb, n.target_id, now],
                )?;
            }

            Ok(LikeInsert::Created)
        })
    }

    /// Returns false when no like existed for the pair.
    pub fn delete_like(&self, user_id: &str, post_id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let removed = conn.execute(
                "DELETE FROM likes WHERE user_id = ?1 AND post_id = ?2",
                params![user_id, post_id],
            )?;
            Ok(removed > 0)
        })
    }

    pub fn count_likes(&self, post_id: &str) -> Result<u64> {
        self.with_conn(|conn| {
            let n: i64 = conn.query_row(
                "SELECT COUNT(*) FROM likes WHERE post_id = ?1",
                [post_id],
                |row| row.get(0),
            )?;
            Ok(n as u64)
        })
    }

    // -- Notifications --

    /// Newest first.
    pub fn list_notifications(
        &self,
        recipient_id: &str,
        unread_only: bool,
    ) -> Result<Vec<NotificationRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "{NOTIFICATION_SELECT}
                 WHERE n.recipient_id = ?1 AND (?2 = 0 OR n.read = 0)
                 ORDER BY n.created_at DESC, n.rowid DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params![recipient_id, unread_only], read_notification)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Mark a notification read. `None` if it does not exist or belongs to
    /// someone other than `recipient_id`.
    pub fn mark_notification_read(
        &self,
        id: &str,
        recipient_id: &str,
    ) -> Result<Option<NotificationRow>> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "UPDATE notifications SET read = 1 WHERE id = ?1 AND recipient_id = ?2",
                params![id, recipient_id],
            )?;
            if changed == 0 {
                return Ok(None);
            }

            let sql = format!("{NOTIFICATION_SELECT} WHERE n.id = ?1");
            Ok(conn.query_row(&sql, [id], read_notification).optional()?)
        })
    }
}

fn read_user(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        bio: row.get(4)?,
        profile_picture: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn read_post(row: &Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        author_id: row.get(1)?,
        author_username: row.get(2)?,
        title: row.get(3)?,
        content: row.get(4)?,
        like_count: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn read_comment(row: &Row<'_>) -> rusqlite::Result<CommentRow> {
    Ok(CommentRow {
        id: row.get(0)?,
        post_id: row.get(1)?,
        author_id: row.get(2)?,
        author_username: row.get(3)?,
        content: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn read_notification(row: &Row<'_>) -> rusqlite::Result<NotificationRow> {
    Ok(NotificationRow {
        id: row.get(0)?,
        recipient_id: row.get(1)?,
        actor_id: row.get(2)?,
        actor_username: row.get(3)?,
        verb: row.get(4)?,
        target_id: row.get(5)?,
        read: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn query_user_summaries(
    conn: &Connection,
    sql: &str,
    user_id: &str,
) -> Result<Vec<UserSummaryRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([user_id], |row| {
            Ok(UserSummaryRow {
                id: row.get(0)?,
                username: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// UNIQUE or PRIMARY KEY constraint failure.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == rusqlite::ErrorCode::ConstraintViolation
                && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        }
        _ => false,
    }
}

/// FOREIGN KEY constraint failure, e.g. the referenced post is gone.
fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
        }
        _ => false,
    }
}

/// Wrap a search term for LIKE, escaping its wildcards.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_with_users(names: &[&str]) -> Database {
        let db = Database::open_in_memory().unwrap();
        for &name in names {
            let outcome = db
                .create_user(&NewUser {
                    id: name,
                    username: name,
                    email: None,
                    password_hash: "x",
                    bio: "",
                    profile_picture: None,
                })
                .unwrap();
            assert_eq!(outcome, UserInsert::Created);
        }
        db
    }

    #[test]
    fn duplicate_username_is_reported() {
        let db = db_with_users(&["alice"]);
        let outcome = db
            .create_user(&NewUser {
                id: "alice-2",
                username: "alice",
                email: None,
                password_hash: "x",
                bio: "",
                profile_picture: None,
            })
            .unwrap();
        assert_eq!(outcome, UserInsert::UsernameTaken);
    }

    #[test]
    fn follow_edge_is_unique() {
        let db = db_with_users(&["alice", "bob"]);
        assert!(db.insert_follow("alice", "bob").unwrap());
        assert!(!db.insert_follow("alice", "bob").unwrap());
        assert_eq!(db.count_following("alice").unwrap(), 1);
        assert_eq!(db.count_followers("bob").unwrap(), 1);
    }

    #[test]
    fn self_follow_violates_check() {
        let db = db_with_users(&["alice"]);
        assert!(db.insert_follow("alice", "alice").is_err());
        assert_eq!(db.count_following("alice").unwrap(), 0);
    }

    #[test]
    fn duplicate_like_is_detected_by_constraint() {
        let db = db_with_users(&["alice", "bob"]);
        db.insert_post("p1", "bob", "t", "c").unwrap();

        assert_eq!(db.insert_like("l1", "alice", "p1", None).unwrap(), LikeInsert::Created);
        assert_eq!(db.insert_like("l2", "alice", "p1", None).unwrap(), LikeInsert::Duplicate);
        assert_eq!(db.count_likes("p1").unwrap(), 1);
    }

    #[test]
    fn like_on_deleted_post_is_post_missing() {
        let db = db_with_users(&["alice", "bob"]);
        db.insert_post("p1", "bob", "t", "c").unwrap();
        assert!(db.delete_post("p1").unwrap());

        let outcome = db
            .insert_like(
                "l1",
                "alice",
                "p1",
                Some(NewNotification {
                    id: "n1",
                    recipient_id: "bob",
                    actor_id: "alice",
                    verb: "liked",
                    target_id: "p1",
                }),
            )
            .unwrap();
        assert_eq!(outcome, LikeInsert::PostMissing);
        assert_eq!(db.count_likes("p1").unwrap(), 0);
        assert!(db.list_notifications("bob", false).unwrap().is_empty());
    }

    #[test]
    fn comment_on_deleted_post_is_post_missing() {
        let db = db_with_users(&["alice"]);
        let outcome = db.insert_comment("c1", "gone", "alice", "hi").unwrap();
        assert_eq!(outcome, CommentInsert::PostMissing);
        assert!(db.get_comment("c1").unwrap().is_none());
    }

    #[test]
    fn empty_string_clears_profile_fields() {
        let db = db_with_users(&["alice"]);
        let email = Some("a@example.com");
        assert!(db.update_profile("alice", email, Some("hi"), Some("a.png")).unwrap());
        assert!(db.update_profile("alice", None, None, None).unwrap());
        let user = db.get_user_by_id("alice").unwrap().unwrap();
        assert_eq!(user.email.as_deref(), Some("a@example.com"));
        assert_eq!(user.profile_picture.as_deref(), Some("a.png"));

        assert!(db.update_profile("alice", Some(""), None, Some("")).unwrap());
        let user = db.get_user_by_id("alice").unwrap().unwrap();
        assert_eq!(user.email, None);
        assert_eq!(user.profile_picture, None);
        assert_eq!(user.bio, "hi");
    }

    #[test]
    fn failed_notification_rolls_back_like() {
        let db = db_with_users(&["alice", "bob"]);
        db.insert_post("p1", "bob", "t", "c").unwrap();

        // Unknown recipient trips the foreign key on the notification insert.
        let result = db.insert_like(
            "l1",
            "alice",
            "p1",
            Some(NewNotification {
                id: "n1",
                recipient_id: "nobody",
                actor_id: "alice",
                verb: "liked",
                target_id: "p1",
            }),
        );

        assert!(result.is_err());
        assert_eq!(db.count_likes("p1").unwrap(), 0);
        assert!(db.list_notifications("bob", false).unwrap().is_empty());
    }

    #[test]
    fn feed_breaks_timestamp_ties_by_insertion() {
        let db = db_with_users(&["alice", "bob"]);
        db.insert_follow("alice", "bob").unwrap();
        db.with_conn_mut(|conn| {
            for id in ["a", "b", "c"] {
                conn.execute(
                    "INSERT INTO posts (id, author_id, title, content, created_at, updated_at)
                     VALUES (?1, 'bob', 't', 'c', ?2, ?2)",
                    [id, "2026-01-01T00:00:00.000000Z"],
                )?;
            }
            Ok(())
        })
        .unwrap();

        let page = |offset| -> Vec<String> {
            let rows = db.feed_posts("alice", 2, offset).unwrap();
            rows.into_iter().map(|p| p.id).collect()
        };
        assert_eq!(page(0), vec!["c", "b"]);
        assert_eq!(page(2), vec!["a"]);
    }

    #[test]
    fn search_escapes_wildcards() {
        let db = db_with_users(&["bob"]);
        db.insert_post("p1", "bob", "100% rust", "body").unwrap();
        db.insert_post("p2", "bob", "1000 rust", "body").unwrap();

        let hits = db.list_posts(Some("0%"), PostOrder::default(), 10, 0).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "p1");
        assert_eq!(db.count_posts(Some("RUST")).unwrap(), 2);
    }

    #[test]
    fn deleting_post_cascades() {
        let db = db_with_users(&["alice", "bob"]);
        db.insert_post("p1", "bob", "t", "c").unwrap();
        assert_eq!(db.insert_comment("c1", "p1", "alice", "hi").unwrap(), CommentInsert::Created);
        db.insert_like(
            "l1",
            "alice",
            "p1",
            Some(NewNotification {
                id: "n1",
                recipient_id: "bob",
                actor_id: "alice",
                verb: "liked",
                target_id: "p1",
            }),
        )
        .unwrap();

        assert!(db.delete_post("p1").unwrap());
        assert!(db.get_comment("c1").unwrap().is_none());
        assert_eq!(db.count_likes("p1").unwrap(), 0);
        assert!(db.list_notifications("bob", false).unwrap().is_empty());
    }

    #[test]
    fn notifications_are_scoped_to_recipient() {
        let db = db_with_users(&["alice", "bob"]);
        db.insert_post("p1", "bob", "t", "c").unwrap();
        db.insert_like(
            "l1",
            "alice",
            "p1",
            Some(NewNotification {
                id: "n1",
                recipient_id: "bob",
                actor_id: "alice",
                verb: "liked",
                target_id: "p1",
            }),
        )
        .unwrap();

        assert!(db.mark_notification_read("n1", "alice").unwrap().is_none());
        let marked = db.mark_notification_read("n1", "bob").unwrap().unwrap();
        assert!(marked.read);
        assert_eq!(marked.actor_username, "alice");
        assert!(db.list_notifications("bob", true).unwrap().is_empty());
        assert_eq!(db.list_notifications("bob", false).unwrap().len(), 1);
    }
}
