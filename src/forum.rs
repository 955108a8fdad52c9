//! The forum handle shared by everything that reads or writes forum data.
//!
//! A [`Forum`] is constructed explicitly and handed to whoever needs it; there
//! is no global instance. All operations take the same lock, and every write
//! is a single transaction underneath, so concurrent callers on an
//! `Arc<Forum>` never see duplicate ids or lost counter increments.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::ForumConfig;
use crate::db::{self, ForumDb};
use crate::error::{Error, Result};
use crate::models::{
    validate_content, validate_title, Comment, CommentCreate, CommentNode, Discussion,
    DiscussionCreate,
};

#[derive(Debug)]
pub struct Forum {
    db: Mutex<ForumDb>,
    config: ForumConfig,
}

impl Forum {
    pub fn new(db: ForumDb, config: ForumConfig) -> Self {
        Self {
            db: Mutex::new(db),
            config,
        }
    }

    /// An empty forum with default limits
    pub fn in_memory() -> Result<Self> {
        Self::with_config(ForumConfig::default())
    }

    pub fn with_config(config: ForumConfig) -> Result<Self> {
        Ok(Self::new(ForumDb::open_in_memory()?, config))
    }

    pub fn config(&self) -> &ForumConfig {
        &self.config
    }

    // --- Discussions ---

    pub fn create_discussion(&self, mut create: DiscussionCreate) -> Result<Discussion> {
        create.title = create.title.trim().to_string();
        create.content = create.content.trim().to_string();
        logged("create_discussion", validate_title(&create.title, self.config.max_title_len))?;

        let db = self.db.lock();
        let discussion = db::create_discussion(db.conn(), &create)?;
        info!(
            discussion_id = discussion.id,
            community_id = %discussion.community_id,
            "discussion created"
        );
        Ok(discussion)
    }

    /// Look a discussion up, failing when it does not exist
    pub fn discussion(&self, id: i64) -> Result<Discussion> {
        let db = self.db.lock();
        db::get_discussion(db.conn(), id)?.ok_or(Error::DiscussionNotFound(id))
    }

    pub fn discussions(&self) -> Result<Vec<Discussion>> {
        let db = self.db.lock();
        db::list_discussions(db.conn())
    }

    pub fn discussions_for_community(&self, community_id: &str) -> Result<Vec<Discussion>> {
        let db = self.db.lock();
        db::list_discussions_by_community(db.conn(), community_id)
    }

    /// Discussions from several communities, most recent first
    pub fn feed(&self, community_ids: &[String]) -> Result<Vec<Discussion>> {
        let db = self.db.lock();
        db::feed_for_communities(db.conn(), community_ids)
    }

    /// Highest-scoring discussions; `None` uses the configured limit
    pub fn trending(&self, limit: Option<usize>) -> Result<Vec<Discussion>> {
        let limit = limit.unwrap_or(self.config.trending_limit);
        let db = self.db.lock();
        db::trending_discussions(db.conn(), limit)
    }

    pub fn upvote_discussion(&self, id: i64) -> Result<Discussion> {
        let db = self.db.lock();
        let discussion = logged("upvote_discussion", db::upvote_discussion(db.conn(), id))?;
        info!(discussion_id = id, upvotes = discussion.upvote_count, "discussion upvoted");
        Ok(discussion)
    }

    pub fn comment_count(&self, discussion_id: i64) -> Result<u32> {
        Ok(self.discussion(discussion_id)?.comment_count)
    }

    // --- Comments ---

    /// Top-level comments with nested replies, in store order. An unknown
    /// discussion yields an empty list; use [`Forum::thread`] to treat it as
    /// an error.
    pub fn list_top_level(&self, discussion_id: i64) -> Result<Vec<CommentNode>> {
        let db = self.db.lock();
        let nodes = db::list_top_level(db.conn(), discussion_id)?;
        debug!(discussion_id, top_level = nodes.len(), "comments listed");
        Ok(nodes)
    }

    /// A discussion with its comment tree, read under one lock. Unlike
    /// [`Forum::list_top_level`] this fails for an unknown discussion.
    pub fn thread(&self, discussion_id: i64) -> Result<(Discussion, Vec<CommentNode>)> {
        let db = self.db.lock();
        let discussion = db::get_discussion(db.conn(), discussion_id)?
            .ok_or(Error::DiscussionNotFound(discussion_id))?;
        let nodes = db::list_top_level(db.conn(), discussion_id)?;
        Ok((discussion, nodes))
    }

    pub fn add_comment(
        &self,
        discussion_id: i64,
        content: &str,
        author: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<CommentNode> {
        self.post(CommentCreate::new(discussion_id, content, author, timestamp))
    }

    pub fn add_reply(
        &self,
        discussion_id: i64,
        parent_id: i64,
        content: &str,
        author: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<CommentNode> {
        self.post(CommentCreate::new(discussion_id, content, author, timestamp).reply_to(parent_id))
    }

    /// Store a comment or reply exactly as described, including any initial
    /// upvotes. Content is trimmed and checked against the configured limit.
    pub fn post(&self, mut create: CommentCreate) -> Result<CommentNode> {
        create.content = create.content.trim().to_string();
        logged("post", validate_content(&create.content, self.config.max_content_len))?;

        let db = self.db.lock();
        let comment = logged("post", db::insert_comment(db.conn(), &create))?;
        info!(
            comment_id = comment.id,
            discussion_id = comment.discussion_id,
            parent_id = ?comment.parent_id,
            "comment added"
        );
        Ok(CommentNode::leaf(comment))
    }

    /// Add one upvote to a comment at any depth
    pub fn upvote(&self, comment_id: i64) -> Result<Comment> {
        let db = self.db.lock();
        let comment = logged("upvote", db::upvote_comment(db.conn(), comment_id))?;
        info!(comment_id, upvotes = comment.upvote_count, "comment upvoted");
        Ok(comment)
    }
}

fn logged<T>(operation: &'static str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        warn!(operation, error = %e, "rejected");
    }
    result
}
