use thiserror::Error;

#[derive(Debug, Error)]
pub enum SocialError {
    /// The referenced entity ("User", "Post", ...) does not exist.
    #[error("{0} not found.")]
    NotFound(&'static str),

    #[error("You cannot follow yourself.")]
    SelfFollow,

    #[error("You have already liked this post.")]
    AlreadyLiked,

    #[error("Like not found.")]
    LikeNotFound,

    #[error("You do not have permission to perform this action.")]
    Forbidden,

    #[error("{0}")]
    Validation(String),

    /// Storage failure (connectivity, lock poisoning, unexpected constraint).
    /// Never retried here.
    #[error("Service temporarily unavailable.")]
    Unavailable(#[from] anyhow::Error),
}

impl SocialError {
    /// Stable machine-readable tag for the error body.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::SelfFollow => "self_follow",
            Self::AlreadyLiked => "already_liked",
            Self::LikeNotFound => "like_not_found",
            Self::Forbidden => "forbidden",
            Self::Validation(_) => "validation",
            Self::Unavailable(_) => "unavailable",
        }
    }
}

pub type SocialResult<T> = Result<T, SocialError>;
