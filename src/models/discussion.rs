use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A post within a community that comments attach to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    pub id: i64,
    pub community_id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    pub link_url: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub upvote_count: u32,
    /// Comments at every depth, kept in step with inserts
    pub comment_count: u32,
}

impl Discussion {
    /// Ranking used by the trending listing
    pub fn trending_score(&self) -> u64 {
        u64::from(self.upvote_count) + 2 * u64::from(self.comment_count)
    }
}

/// Data for creating a new discussion
#[derive(Debug, Clone, Default)]
pub struct DiscussionCreate {
    pub community_id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    pub link_url: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Starting upvotes, used when importing existing posts
    pub upvote_count: u32,
}

pub fn validate_title(title: &str, max_len: usize) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::InvalidTitle("title is required".to_string()));
    }
    let len = title.chars().count();
    if len > max_len {
        return Err(Error::InvalidTitle(format!(
            "{} characters, the limit is {}",
            len, max_len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discussion(upvote_count: u32, comment_count: u32) -> Discussion {
        Discussion {
            id: 1,
            community_id: "1".to_string(),
            title: "Hello".to_string(),
            content: "World".to_string(),
            author: "alice".to_string(),
            tags: vec!["intro".to_string()],
            link_url: None,
            timestamp: Utc::now(),
            upvote_count,
            comment_count,
        }
    }

    #[test]
    fn trending_score_weights_comments_double() {
        assert_eq!(discussion(10, 0).trending_score(), 10);
        assert_eq!(discussion(10, 3).trending_score(), 16);
        assert_eq!(discussion(u32::MAX, u32::MAX).trending_score(), 3 * u64::from(u32::MAX));
    }

    #[test]
    fn discussion_serializes_to_json() {
        let json = serde_json::to_string(&discussion(2, 5)).unwrap();
        assert!(json.contains("\"community_id\":\"1\""));
        assert!(json.contains("\"tags\":[\"intro\"]"));
        assert!(json.contains("\"comment_count\":5"));
    }

    #[test]
    fn validate_title_limits() {
        assert!(validate_title("A title", 200).is_ok());
        assert!(validate_title("   ", 200).is_err());
        assert!(validate_title(&"x".repeat(201), 200).is_err());
    }
}
