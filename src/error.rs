use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Discussion #{0} not found")]
    DiscussionNotFound(i64),

    #[error("Comment #{0} not found")]
    CommentNotFound(i64),

    #[error("Cannot reply to comment #{parent_id}: no such comment in discussion #{discussion_id}")]
    ParentNotFound { parent_id: i64, discussion_id: i64 },

    #[error("Comment content must not be empty")]
    EmptyContent,

    #[error("Content is {len} characters long, the limit is {max}")]
    ContentTooLong { len: usize, max: usize },

    #[error("Invalid title: {0}")]
    InvalidTitle(String),

    #[error("{0} already has the maximum number of upvotes")]
    UpvoteLimit(String),

    #[error("Invalid sort mode '{0}': must be newest or most-upvoted")]
    InvalidSortMode(String),

    #[error("Invalid timestamp '{0}': expected RFC 3339 (e.g., 2024-01-15T10:30:00Z)")]
    InvalidTimestamp(String),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// A discussion or comment id that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::DiscussionNotFound(_) | Error::CommentNotFound(_) | Error::ParentNotFound { .. }
        )
    }

    /// Input rejected before anything was written.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::EmptyContent
                | Error::ContentTooLong { .. }
                | Error::InvalidTitle(_)
                | Error::InvalidSortMode(_)
                | Error::InvalidTimestamp(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
