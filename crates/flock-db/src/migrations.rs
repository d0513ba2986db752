use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            BEGIN;

            CREATE TABLE users (
                id               TEXT PRIMARY KEY,
                username         TEXT NOT NULL UNIQUE,
                email            TEXT,
                password         TEXT NOT NULL,
                bio              TEXT NOT NULL DEFAULT '',
                profile_picture  TEXT,
                created_at       TEXT NOT NULL
            );

            CREATE TABLE follows (
                follower_id  TEXT NOT NULL REFERENCES users(id),
                followee_id  TEXT NOT NULL REFERENCES users(id),
                created_at   TEXT NOT NULL,
                PRIMARY KEY (follower_id, followee_id),
                CHECK (follower_id <> followee_id)
            );

            CREATE INDEX idx_follows_followee
                ON follows(followee_id);

            CREATE TABLE posts (
                id          TEXT PRIMARY KEY,
                author_id   TEXT NOT NULL REFERENCES users(id),
                title       TEXT NOT NULL,
                content     TEXT NOT NULL,
                created_at  TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            );

            CREATE INDEX idx_posts_author
                ON posts(author_id, created_at);

            CREATE TABLE comments (
                id          TEXT PRIMARY KEY,
                post_id     TEXT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
                author_id   TEXT NOT NULL REFERENCES users(id),
                content     TEXT NOT NULL,
                created_at  TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            );

            CREATE INDEX idx_comments_post
                ON comments(post_id, created_at);

            CREATE TABLE likes (
                id          TEXT PRIMARY KEY,
                user_id     TEXT NOT NULL REFERENCES users(id),
                post_id     TEXT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
                created_at  TEXT NOT NULL,
                UNIQUE(user_id, post_id)
            );

            CREATE INDEX idx_likes_post
                ON likes(post_id);

            CREATE TABLE notifications (
                id            TEXT PRIMARY KEY,
                recipient_id  TEXT NOT NULL REFERENCES users(id),
                actor_id      TEXT NOT NULL REFERENCES users(id),
                verb          TEXT NOT NULL,
                target_id     TEXT NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
                read          INTEGER NOT NULL DEFAULT 0,
                created_at    TEXT NOT NULL
            );

            CREATE INDEX idx_notifications_recipient
                ON notifications(recipient_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);

            COMMIT;
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
