//! Mock fixture loading.
//!
//! A fixture is replayed through the regular [`Forum`] operations, so seeded
//! data obeys the same rules as anything posted later: fresh ids are
//! assigned, replies are linked to already-inserted parents and every
//! `comment_count` is produced by the inserts themselves.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::forum::Forum;
use crate::models::{CommentCreate, DiscussionCreate};

/// The fixture bundled with the crate
pub const BUILTIN_SEED: &str = include_str!("../data/seed.json");

#[derive(Debug, Clone, Deserialize)]
pub struct Seed {
    pub discussions: Vec<SeedDiscussion>,
    #[serde(default)]
    pub comments: Vec<SeedComment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedDiscussion {
    pub id: i64,
    pub community_id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub upvote_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedComment {
    pub id: i64,
    pub discussion_id: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub content: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub upvote_count: u32,
}

/// How much a fixture put into the forum, and where fixture ids ended up
#[derive(Debug, Clone, Default)]
pub struct SeedSummary {
    pub discussion_ids: HashMap<i64, i64>,
    pub comment_ids: HashMap<i64, i64>,
}

impl Seed {
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_SEED)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::parse(&std::fs::read_to_string(path)?)
    }
}

/// Replay a fixture into `forum`.
///
/// Comments are inserted in fixture-id order, so a reply must carry a higher
/// fixture id than its parent.
pub fn load(forum: &Forum, seed: &Seed) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for discussion in &seed.discussions {
        let created = forum.create_discussion(DiscussionCreate {
            community_id: discussion.community_id.clone(),
            title: discussion.title.clone(),
            content: discussion.content.clone(),
            author: discussion.author.clone(),
            tags: discussion.tags.clone(),
            link_url: discussion.link_url.clone(),
            timestamp: discussion.timestamp,
            upvote_count: discussion.upvote_count,
        })?;
        summary.discussion_ids.insert(discussion.id, created.id);
    }

    let mut comments: Vec<&SeedComment> = seed.comments.iter().collect();
    comments.sort_by_key(|c| c.id);

    for comment in comments {
        let discussion_id = *summary
            .discussion_ids
            .get(&comment.discussion_id)
            .ok_or(Error::DiscussionNotFound(comment.discussion_id))?;

        let mut create = CommentCreate::new(
            discussion_id,
            comment.content.as_str(),
            comment.author.as_str(),
            comment.timestamp,
        )
        .with_upvotes(comment.upvote_count);

        if let Some(parent_id) = comment.parent_id {
            let mapped = summary
                .comment_ids
                .get(&parent_id)
                .copied()
                .ok_or(Error::ParentNotFound {
                    parent_id,
                    discussion_id,
                })?;
            create = create.reply_to(mapped);
        }

        let node = forum.post(create)?;
        summary.comment_ids.insert(comment.id, node.id());
    }

    info!(
        discussions = summary.discussion_ids.len(),
        comments = summary.comment_ids.len(),
        "seed loaded"
    );
    Ok(summary)
}
