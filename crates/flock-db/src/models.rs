//! Database row types. These map directly to SQLite rows and stay distinct
//! from the flock-types API models to keep the DB layer independent.

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub bio: String,
    pub profile_picture: Option<String>,
    pub created_at: String,
}

pub struct UserSummaryRow {
    pub id: String,
    pub username: String,
}

pub struct PostRow {
    pub id: String,
    pub author_id: String,
    pub author_username: String,
    pub title: String,
    pub content: String,
    pub like_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

pub struct CommentRow {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub author_username: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

pub struct NotificationRow {
    pub id: String,
    pub recipient_id: String,
    pub actor_id: String,
    pub actor_username: String,
    pub verb: String,
    pub target_id: String,
    pub read: bool,
    pub created_at: String,
}

// -- Insert payloads --

pub struct NewUser<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub password_hash: &'a str,
    pub bio: &'a str,
    pub profile_picture: Option<&'a str>,
}

pub struct NewNotification<'a> {
    pub id: &'a str,
    pub recipient_id: &'a str,
    pub actor_id: &'a str,
    pub verb: &'a str,
    pub target_id: &'a str,
}

// -- Write outcomes --

/// Result of inserting a user; a taken username is an expected outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInsert {
    Created,
    UsernameTaken,
}

/// Result of inserting a like; the UNIQUE(user_id, post_id) constraint decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeInsert {
    Created,
    Duplicate,
    PostMissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentInsert {
    Created,
    PostMissing,
}

/// Sort orders accepted by the post listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrder {
    #[default]
    NewestFirst,
    OldestFirst,
    TitleAsc,
    TitleDesc,
}

impl PostOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "-created_at" => Some(Self::NewestFirst),
            "created_at" => Some(Self::OldestFirst),
            "title" => Some(Self::TitleAsc),
            "-title" => Some(Self::TitleDesc),
            _ => None,
        }
    }

    pub(crate) fn order_by(self) -> &'static str {
        match self {
            Self::NewestFirst => "p.created_at DESC, p.rowid DESC",
            Self::OldestFirst => "p.created_at ASC, p.rowid ASC",
            Self::TitleAsc => "p.title COLLATE NOCASE ASC, p.rowid ASC",
            Self::TitleDesc => "p.title COLLATE NOCASE DESC, p.rowid DESC",
        }
    }
}
