use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A comment on a discussion, top-level or a reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub discussion_id: i64,
    pub parent_id: Option<i64>,
    pub content: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub upvote_count: u32,
}

impl Comment {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A comment together with its materialized replies.
///
/// Built fresh from the flat comment table on every read and never written
/// back; holding one does not keep anything in the store alive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    pub fn leaf(comment: Comment) -> Self {
        Self {
            comment,
            replies: Vec::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.comment.id
    }

    /// Number of comments in this subtree, the node itself included
    pub fn total_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.replies.iter());
        }
        count
    }
}

// Reply depth is unbounded, so subtrees are released from a worklist rather
// than through nested drop calls.
impl Drop for CommentNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.replies);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.replies);
        }
    }
}

/// Data for creating a new comment or reply
#[derive(Debug, Clone, Default)]
pub struct CommentCreate {
    pub discussion_id: i64,
    pub parent_id: Option<i64>,
    pub content: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub upvote_count: u32,
}

impl CommentCreate {
    pub fn new(
        discussion_id: i64,
        content: impl Into<String>,
        author: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            discussion_id,
            parent_id: None,
            content: content.into(),
            author: author.into(),
            timestamp,
            upvote_count: 0,
        }
    }

    pub fn reply_to(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_upvotes(mut self, upvote_count: u32) -> Self {
        self.upvote_count = upvote_count;
        self
    }
}

/// Check comment text the way the comment box does: non-blank, at most
/// `max_len` characters.
pub fn validate_content(content: &str, max_len: usize) -> Result<()> {
    if content.trim().is_empty() {
        return Err(Error::EmptyContent);
    }
    let len = content.chars().count();
    if len > max_len {
        return Err(Error::ContentTooLong { len, max: max_len });
    }
    Ok(())
}
