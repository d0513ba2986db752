use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use flock_db::models::{CommentRow, NotificationRow, PostRow, UserSummaryRow};
use flock_types::models::{CommentView, NotificationView, PostView, UserSummary};

pub(crate) fn uuid(value: &str, field: &str) -> Uuid {
    value.parse().unwrap_or_else(|e| {
        warn!("Corrupt {} '{}': {}", field, value, e);
        Uuid::default()
    })
}

pub(crate) fn timestamp(value: &str, field: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Rows written by hand or by SQLite's datetime('now') lack an offset.
            chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt {} '{}': {}", field, value, e);
            DateTime::default()
        })
}

pub(crate) fn post_view(row: PostRow) -> PostView {
    PostView {
        id: uuid(&row.id, "post id"),
        author_id: uuid(&row.author_id, "post author_id"),
        author_username: row.author_username,
        title: row.title,
        content: row.content,
        like_count: row.like_count.max(0) as u64,
        created_at: timestamp(&row.created_at, "post created_at"),
        updated_at: timestamp(&row.updated_at, "post updated_at"),
    }
}

pub(crate) fn comment_view(row: CommentRow) -> CommentView {
    CommentView {
        id: uuid(&row.id, "comment id"),
        post_id: uuid(&row.post_id, "comment post_id"),
        author_id: uuid(&row.author_id, "comment author_id"),
        author_username: row.author_username,
        content: row.content,
        created_at: timestamp(&row.created_at, "comment created_at"),
        updated_at: timestamp(&row.updated_at, "comment updated_at"),
    }
}

pub(crate) fn notification_view(row: NotificationRow) -> NotificationView {
    NotificationView {
        id: uuid(&row.id, "notification id"),
        recipient_id: uuid(&row.recipient_id, "notification recipient_id"),
        actor_id: uuid(&row.actor_id, "notification actor_id"),
        actor_username: row.actor_username,
        verb: row.verb,
        target_id: uuid(&row.target_id, "notification target_id"),
        read: row.read,
        created_at: timestamp(&row.created_at, "notification created_at"),
    }
}

pub(crate) fn user_summary(row: UserSummaryRow) -> UserSummary {
    UserSummary {
        id: uuid(&row.id, "user id"),
        username: row.username,
    }
}
