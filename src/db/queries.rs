// Query helpers for forum database operations

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::models::{Comment, CommentCreate, CommentNode, Discussion, DiscussionCreate};

const DISCUSSION_COLUMNS: &str = "id, community_id, title, content, author, tags, link_url,
     timestamp, upvote_count, comment_count";

// Counters are read back as u32; updates stop here
const MAX_COUNTER: u32 = u32::MAX;

const COMMENT_COLUMNS: &str =
    "id, discussion_id, parent_id, content, author, timestamp, upvote_count";

// --- Discussions ---

/// Create a new discussion; `comment_count` always starts at zero
pub fn create_discussion(conn: &Connection, create: &DiscussionCreate) -> Result<Discussion> {
    let tags = serde_json::to_string(&create.tags)?;

    conn.execute(
        "INSERT INTO discussions (community_id, title, content, author, tags, link_url, timestamp, upvote_count)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            create.community_id,
            create.title,
            create.content,
            create.author,
            tags,
            create.link_url,
            format_timestamp(&create.timestamp),
            create.upvote_count,
        ],
    )?;

    let id = conn.last_insert_rowid();
    get_discussion(conn, id)?.ok_or(Error::DiscussionNotFound(id))
}

/// Get a single discussion by ID
pub fn get_discussion(conn: &Connection, id: i64) -> Result<Option<Discussion>> {
    let sql = format!("SELECT {} FROM discussions WHERE id = ?1", DISCUSSION_COLUMNS);
    let discussion = conn.query_row(&sql, [id], row_to_discussion).optional()?;
    Ok(discussion)
}

/// All discussions, most recent first
pub fn list_discussions(conn: &Connection) -> Result<Vec<Discussion>> {
    let sql = format!(
        "SELECT {} FROM discussions ORDER BY timestamp DESC, id DESC",
        DISCUSSION_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let discussions = stmt
        .query_map([], row_to_discussion)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(discussions)
}

/// Discussions of one community, most recent first
pub fn list_discussions_by_community(
    conn: &Connection,
    community_id: &str,
) -> Result<Vec<Discussion>> {
    feed_for_communities(conn, &[community_id.to_string()])
}

/// Discussions of any of the given communities, most recent first
pub fn feed_for_communities(conn: &Connection, community_ids: &[String]) -> Result<Vec<Discussion>> {
    if community_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = (1..=community_ids.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT {} FROM discussions WHERE community_id IN ({})
         ORDER BY timestamp DESC, id DESC",
        DISCUSSION_COLUMNS, placeholders
    );

    let params_refs: Vec<&dyn rusqlite::ToSql> = community_ids
        .iter()
        .map(|id| id as &dyn rusqlite::ToSql)
        .collect();

    let mut stmt = conn.prepare(&sql)?;
    let discussions = stmt
        .query_map(params_refs.as_slice(), row_to_discussion)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(discussions)
}

/// Discussions ranked by `upvote_count + 2 * comment_count`
pub fn trending_discussions(conn: &Connection, limit: usize) -> Result<Vec<Discussion>> {
    let sql = format!(
        "SELECT {} FROM discussions
         ORDER BY (upvote_count + 2 * comment_count) DESC, timestamp DESC, id DESC
         LIMIT ?1",
        DISCUSSION_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let discussions = stmt
        .query_map([i64::try_from(limit).unwrap_or(i64::MAX)], row_to_discussion)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(discussions)
}

/// Add one upvote to a discussion
pub fn upvote_discussion(conn: &Connection, id: i64) -> Result<Discussion> {
    let affected = conn.execute(
        "UPDATE discussions SET upvote_count = upvote_count + 1
         WHERE id = ?1 AND upvote_count < ?2",
        params![id, MAX_COUNTER],
    )?;

    let discussion = get_discussion(conn, id)?.ok_or(Error::DiscussionNotFound(id))?;
    if affected == 0 {
        return Err(Error::UpvoteLimit(format!("Discussion #{}", id)));
    }
    Ok(discussion)
}

// --- Comments ---

/// Insert a comment, or a reply when `parent_id` is set.
///
/// Id allocation, the insert and the discussion's `comment_count` increment
/// happen in one transaction: either all three land or none does.
pub fn insert_comment(conn: &Connection, create: &CommentCreate) -> Result<Comment> {
    if create.content.trim().is_empty() {
        return Err(Error::EmptyContent);
    }

    let tx = conn.unchecked_transaction()?;

    let discussion_exists: bool = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM discussions WHERE id = ?1)",
        [create.discussion_id],
        |row| row.get(0),
    )?;
    if !discussion_exists {
        return Err(Error::DiscussionNotFound(create.discussion_id));
    }

    if let Some(parent_id) = create.parent_id {
        let parent_discussion: Option<i64> = tx
            .query_row(
                "SELECT discussion_id FROM comments WHERE id = ?1",
                [parent_id],
                |row| row.get(0),
            )
            .optional()?;

        // A parent from another discussion is as good as missing
        if parent_discussion != Some(create.discussion_id) {
            return Err(Error::ParentNotFound {
                parent_id,
                discussion_id: create.discussion_id,
            });
        }
    }

    tx.execute(
        "INSERT INTO comments (discussion_id, parent_id, content, author, timestamp, upvote_count)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            create.discussion_id,
            create.parent_id,
            create.content,
            create.author,
            format_timestamp(&create.timestamp),
            create.upvote_count,
        ],
    )?;
    let id = tx.last_insert_rowid();

    tx.execute(
        "UPDATE discussions SET comment_count = comment_count + 1 WHERE id = ?1",
        [create.discussion_id],
    )?;

    tx.commit()?;

    Ok(Comment {
        id,
        discussion_id: create.discussion_id,
        parent_id: create.parent_id,
        content: create.content.clone(),
        author: create.author.clone(),
        timestamp: create.timestamp,
        upvote_count: create.upvote_count,
    })
}

/// Get a single comment by ID
pub fn get_comment(conn: &Connection, id: i64) -> Result<Option<Comment>> {
    let sql = format!("SELECT {} FROM comments WHERE id = ?1", COMMENT_COLUMNS);
    let comment = conn.query_row(&sql, [id], row_to_comment).optional()?;
    Ok(comment)
}

/// Add one upvote to a comment at any depth
pub fn upvote_comment(conn: &Connection, id: i64) -> Result<Comment> {
    let affected = conn.execute(
        "UPDATE comments SET upvote_count = upvote_count + 1
         WHERE id = ?1 AND upvote_count < ?2",
        params![id, MAX_COUNTER],
    )?;

    let comment = get_comment(conn, id)?.ok_or(Error::CommentNotFound(id))?;
    if affected == 0 {
        return Err(Error::UpvoteLimit(format!("Comment #{}", id)));
    }
    Ok(comment)
}

/// Every comment of a discussion as a flat list, newest insert first
pub fn list_comments(conn: &Connection, discussion_id: i64) -> Result<Vec<Comment>> {
    let sql = format!(
        "SELECT {} FROM comments WHERE discussion_id = ?1 ORDER BY id DESC",
        COMMENT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let comments = stmt
        .query_map([discussion_id], row_to_comment)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(comments)
}

/// Top-level comments of a discussion with their replies attached at every
/// depth. Each level keeps store order (newest insert first). An unknown
/// discussion simply has no comments.
pub fn list_top_level(conn: &Connection, discussion_id: i64) -> Result<Vec<CommentNode>> {
    Ok(build_tree(list_comments(conn, discussion_id)?))
}

/// Number of comment rows attached to a discussion, counted directly
pub fn count_comments(conn: &Connection, discussion_id: i64) -> Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM comments WHERE discussion_id = ?1",
        [discussion_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Group a flat list by parent and materialize the forest. Sibling order
/// follows the input order. Nodes are finished bottom-up from an explicit
/// stack, so nesting depth is limited by memory only.
fn build_tree(comments: Vec<Comment>) -> Vec<CommentNode> {
    struct Level {
        comment: Option<Comment>,
        // Reversed, so `pop` yields input order
        pending: Vec<Comment>,
        built: Vec<CommentNode>,
    }

    let mut children: HashMap<Option<i64>, Vec<Comment>> = HashMap::new();
    for comment in comments {
        children.entry(comment.parent_id).or_default().push(comment);
    }
    let mut take_children = |parent_id: Option<i64>| {
        let mut list = children.remove(&parent_id).unwrap_or_default();
        list.reverse();
        list
    };

    let mut stack = vec![Level {
        comment: None,
        pending: take_children(None),
        built: Vec::new(),
    }];

    while let Some(level) = stack.last_mut() {
        if let Some(next) = level.pending.pop() {
            let pending = take_children(Some(next.id));
            stack.push(Level {
                comment: Some(next),
                pending,
                built: Vec::new(),
            });
            continue;
        }

        let Some(done) = stack.pop() else { break };
        match (done.comment, stack.last_mut()) {
            (Some(comment), Some(parent)) => parent.built.push(CommentNode {
                comment,
                replies: done.built,
            }),
            (_, _) => return done.built,
        }
    }

    Vec::new()
}

// Helper functions for converting database values

fn row_to_discussion(row: &Row) -> rusqlite::Result<Discussion> {
    let tags: String = row.get(5)?;
    Ok(Discussion {
        id: row.get(0)?,
        community_id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        author: row.get(4)?,
        tags: serde_json::from_str(&tags).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?,
        link_url: row.get(6)?,
        timestamp: parse_timestamp(7, row.get(7)?)?,
        upvote_count: row.get(8)?,
        comment_count: row.get(9)?,
    })
}

fn row_to_comment(row: &Row) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        discussion_id: row.get(1)?,
        parent_id: row.get(2)?,
        content: row.get(3)?,
        author: row.get(4)?,
        timestamp: parse_timestamp(5, row.get(5)?)?,
        upvote_count: row.get(6)?,
    })
}

// Fixed-width RFC 3339 so that text order matches time order
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(idx: usize, s: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ForumDb;
    use chrono::{Duration, TimeZone};

    fn test_db() -> ForumDb {
        ForumDb::open_in_memory().unwrap()
    }

    fn t(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn discussion(conn: &Connection, community_id: &str, title: &str, at: i64) -> Discussion {
        create_discussion(
            conn,
            &DiscussionCreate {
                community_id: community_id.to_string(),
                title: title.to_string(),
                content: "body".to_string(),
                author: "alice".to_string(),
                timestamp: t(at),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn comment(conn: &Connection, discussion_id: i64, content: &str, at: i64) -> Comment {
        insert_comment(conn, &CommentCreate::new(discussion_id, content, "bob", t(at))).unwrap()
    }

    fn reply(conn: &Connection, discussion_id: i64, parent_id: i64, content: &str, at: i64) -> Comment {
        insert_comment(
            conn,
            &CommentCreate::new(discussion_id, content, "carol", t(at)).reply_to(parent_id),
        )
        .unwrap()
    }

    fn comment_count(conn: &Connection, id: i64) -> u32 {
        get_discussion(conn, id).unwrap().unwrap().comment_count
    }

    // create_discussion / get_discussion

    #[test]
    fn create_discussion_starts_with_zero_comment_count() {
        let db = test_db();
        let created = create_discussion(
            db.conn(),
            &DiscussionCreate {
                community_id: "7".to_string(),
                title: "Welcome".to_string(),
                content: "Say hi".to_string(),
                author: "alice".to_string(),
                tags: vec!["intro".to_string(), "meta".to_string()],
                link_url: Some("https://example.com".to_string()),
                timestamp: t(0),
                upvote_count: 0,
            },
        )
        .unwrap();

        assert_eq!(created.upvote_count, 0);
        assert_eq!(created.comment_count, 0);
        assert_eq!(created.tags, vec!["intro", "meta"]);
        assert_eq!(created.timestamp, t(0));

        let fetched = get_discussion(db.conn(), created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn get_discussion_missing_returns_none() {
        let db = test_db();
        assert!(get_discussion(db.conn(), 999).unwrap().is_none());
    }

    // insert_comment

    #[test]
    fn first_comment_gets_id_one_and_bumps_count() {
        let db = test_db();
        let d = discussion(db.conn(), "1", "D1", 0);

        let first = comment(db.conn(), d.id, "first", 1);
        assert_eq!(first.id, 1);
        assert_eq!(first.parent_id, None);
        assert_eq!(comment_count(db.conn(), d.id), 1);

        let second = reply(db.conn(), d.id, first.id, "reply1", 2);
        assert_eq!(second.id, 2);
        assert_eq!(second.parent_id, Some(1));
        assert_eq!(comment_count(db.conn(), d.id), 2);
    }

    #[test]
    fn insert_comment_keeps_initial_upvotes() {
        let db = test_db();
        let d = discussion(db.conn(), "1", "D1", 0);
        let created = insert_comment(
            db.conn(),
            &CommentCreate::new(d.id, "seeded", "bob", t(1)).with_upvotes(12),
        )
        .unwrap();

        assert_eq!(created.upvote_count, 12);
        assert_eq!(get_comment(db.conn(), created.id).unwrap().unwrap().upvote_count, 12);
    }

    #[test]
    fn insert_comment_unknown_discussion_fails() {
        let db = test_db();
        let result = insert_comment(db.conn(), &CommentCreate::new(42, "hi", "bob", t(0)));
        assert!(matches!(result, Err(Error::DiscussionNotFound(42))));
    }

    #[test]
    fn insert_comment_blank_content_fails_without_side_effects() {
        let db = test_db();
        let d = discussion(db.conn(), "1", "D1", 0);

        let result = insert_comment(db.conn(), &CommentCreate::new(d.id, "  ", "bob", t(0)));
        assert!(matches!(result, Err(Error::EmptyContent)));
        assert_eq!(comment_count(db.conn(), d.id), 0);
    }

    #[test]
    fn reply_to_missing_parent_leaves_count_unchanged() {
        let db = test_db();
        let d = discussion(db.conn(), "1", "D1", 0);
        comment(db.conn(), d.id, "first", 1);

        let result = insert_comment(
            db.conn(),
            &CommentCreate::new(d.id, "x", "dave", t(3)).reply_to(999),
        );

        assert!(matches!(
            result,
            Err(Error::ParentNotFound {
                parent_id: 999,
                discussion_id
            }) if discussion_id == d.id
        ));
        assert_eq!(comment_count(db.conn(), d.id), 1);
        assert_eq!(count_comments(db.conn(), d.id).unwrap(), 1);
    }

    #[test]
    fn reply_to_parent_in_other_discussion_fails() {
        let db = test_db();
        let d1 = discussion(db.conn(), "1", "D1", 0);
        let d2 = discussion(db.conn(), "1", "D2", 0);
        let parent = comment(db.conn(), d1.id, "in d1", 1);

        let result = insert_comment(
            db.conn(),
            &CommentCreate::new(d2.id, "cross", "eve", t(2)).reply_to(parent.id),
        );

        assert!(matches!(result, Err(Error::ParentNotFound { .. })));
        assert_eq!(comment_count(db.conn(), d2.id), 0);
    }

    #[test]
    fn failed_insert_does_not_burn_an_id() {
        let db = test_db();
        let d = discussion(db.conn(), "1", "D1", 0);
        let _ = insert_comment(db.conn(), &CommentCreate::new(d.id, "x", "dave", t(0)).reply_to(5));

        let created = comment(db.conn(), d.id, "ok", 1);
        assert_eq!(created.id, 1);
    }

    // upvote_comment

    #[test]
    fn upvote_nested_comment_twice_adds_two() {
        let db = test_db();
        let d = discussion(db.conn(), "1", "D1", 0);
        let root = comment(db.conn(), d.id, "root", 1);
        let mid = reply(db.conn(), d.id, root.id, "mid", 2);
        let leaf = reply(db.conn(), d.id, mid.id, "leaf", 3);

        upvote_comment(db.conn(), leaf.id).unwrap();
        let updated = upvote_comment(db.conn(), leaf.id).unwrap();

        assert_eq!(updated.upvote_count, 2);
        assert_eq!(updated.parent_id, Some(mid.id));
        assert_eq!(get_comment(db.conn(), root.id).unwrap().unwrap().upvote_count, 0);
    }

    #[test]
    fn upvote_missing_comment_fails() {
        let db = test_db();
        assert!(matches!(
            upvote_comment(db.conn(), 77),
            Err(Error::CommentNotFound(77))
        ));
    }

    #[test]
    fn upvote_at_counter_limit_fails_and_keeps_thread_readable() {
        let db = test_db();
        let d = discussion(db.conn(), "1", "D1", 0);
        let maxed = insert_comment(
            db.conn(),
            &CommentCreate::new(d.id, "popular", "erin", t(1)).with_upvotes(u32::MAX),
        )
        .unwrap();

        assert!(matches!(
            upvote_comment(db.conn(), maxed.id),
            Err(Error::UpvoteLimit(_))
        ));
        let nodes = list_top_level(db.conn(), d.id).unwrap();
        assert_eq!(nodes[0].comment.upvote_count, u32::MAX);
    }

    // list_top_level

    #[test]
    fn list_top_level_round_trip() {
        let db = test_db();
        let d = discussion(db.conn(), "1", "D1", 0);
        comment(db.conn(), d.id, "hello", 0);

        let nodes = list_top_level(db.conn(), d.id).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].comment.content, "hello");
        assert_eq!(nodes[0].comment.parent_id, None);
        assert!(nodes[0].replies.is_empty());
    }

    #[test]
    fn list_top_level_nests_replies_to_any_depth() {
        let db = test_db();
        let d = discussion(db.conn(), "1", "D1", 0);
        let root = comment(db.conn(), d.id, "root", 0);
        let mut parent = root.id;
        for depth in 1..=12 {
            parent = reply(db.conn(), d.id, parent, &format!("depth {}", depth), depth).id;
        }

        let nodes = list_top_level(db.conn(), d.id).unwrap();
        assert_eq!(nodes.len(), 1);

        let mut depth = 0;
        let mut node = &nodes[0];
        while let Some(child) = node.replies.first() {
            assert_eq!(child.comment.parent_id, Some(node.id()));
            node = child;
            depth += 1;
        }
        assert_eq!(depth, 12);
        assert_eq!(nodes[0].total_count() as u32, comment_count(db.conn(), d.id));
    }

    #[test]
    fn list_top_level_is_newest_insert_first_at_each_level() {
        let db = test_db();
        let d = discussion(db.conn(), "1", "D1", 0);
        let a = comment(db.conn(), d.id, "a", 0);
        let b = comment(db.conn(), d.id, "b", 1);
        let a1 = reply(db.conn(), d.id, a.id, "a1", 2);
        let a2 = reply(db.conn(), d.id, a.id, "a2", 3);

        let nodes = list_top_level(db.conn(), d.id).unwrap();
        let top: Vec<i64> = nodes.iter().map(CommentNode::id).collect();
        assert_eq!(top, vec![b.id, a.id]);

        let replies: Vec<i64> = nodes[1].replies.iter().map(CommentNode::id).collect();
        assert_eq!(replies, vec![a2.id, a1.id]);
    }

    #[test]
    fn list_top_level_only_includes_own_discussion() {
        let db = test_db();
        let d1 = discussion(db.conn(), "1", "D1", 0);
        let d2 = discussion(db.conn(), "1", "D2", 0);
        comment(db.conn(), d1.id, "mine", 0);
        comment(db.conn(), d2.id, "theirs", 0);

        let nodes = list_top_level(db.conn(), d1.id).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].comment.content, "mine");
    }

    #[test]
    fn list_top_level_empty_and_unknown_discussions() {
        let db = test_db();
        let d = discussion(db.conn(), "1", "D1", 0);
        assert!(list_top_level(db.conn(), d.id).unwrap().is_empty());
        assert!(list_top_level(db.conn(), 999).unwrap().is_empty());
    }

    #[test]
    fn comment_timestamps_survive_storage_with_subsecond_precision() {
        let db = test_db();
        let d = discussion(db.conn(), "1", "D1", 0);
        let at = t(5) + Duration::microseconds(123_456);
        let created = insert_comment(db.conn(), &CommentCreate::new(d.id, "precise", "bob", at)).unwrap();

        let fetched = get_comment(db.conn(), created.id).unwrap().unwrap();
        assert_eq!(fetched.timestamp, at);
    }

    // Discussion listings

    #[test]
    fn community_listing_is_most_recent_first() {
        let db = test_db();
        let old = discussion(db.conn(), "1", "old", 0);
        let new = discussion(db.conn(), "1", "new", 10);
        discussion(db.conn(), "2", "elsewhere", 5);

        let listed: Vec<i64> = list_discussions_by_community(db.conn(), "1")
            .unwrap()
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(listed, vec![new.id, old.id]);
    }

    #[test]
    fn feed_merges_communities() {
        let db = test_db();
        let a = discussion(db.conn(), "1", "a", 0);
        let b = discussion(db.conn(), "2", "b", 1);
        discussion(db.conn(), "3", "c", 2);

        let feed: Vec<i64> = feed_for_communities(db.conn(), &["1".to_string(), "2".to_string()])
            .unwrap()
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(feed, vec![b.id, a.id]);
        assert!(feed_for_communities(db.conn(), &[]).unwrap().is_empty());
    }

    #[test]
    fn trending_counts_comments_double() {
        let db = test_db();
        let upvoted = discussion(db.conn(), "1", "upvoted", 0);
        let discussed = discussion(db.conn(), "1", "discussed", 0);
        let quiet = discussion(db.conn(), "1", "quiet", 0);

        for _ in 0..3 {
            upvote_discussion(db.conn(), upvoted.id).unwrap();
        }
        comment(db.conn(), discussed.id, "one", 1);
        comment(db.conn(), discussed.id, "two", 2);

        let trending: Vec<i64> = trending_discussions(db.conn(), 20)
            .unwrap()
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(trending, vec![discussed.id, upvoted.id, quiet.id]);

        assert_eq!(trending_discussions(db.conn(), 1).unwrap().len(), 1);
    }

    #[test]
    fn trending_with_huge_limit_returns_everything() {
        let db = test_db();
        discussion(db.conn(), "1", "a", 0);
        discussion(db.conn(), "1", "b", 1);
        assert_eq!(trending_discussions(db.conn(), usize::MAX).unwrap().len(), 2);
    }

    #[test]
    fn discussion_upvote_at_counter_limit_fails() {
        let db = test_db();
        let maxed = create_discussion(
            db.conn(),
            &DiscussionCreate {
                community_id: "1".to_string(),
                title: "maxed".to_string(),
                upvote_count: u32::MAX,
                ..Default::default()
            },
        )
        .unwrap();

        assert!(matches!(
            upvote_discussion(db.conn(), maxed.id),
            Err(Error::UpvoteLimit(_))
        ));
        assert_eq!(
            get_discussion(db.conn(), maxed.id).unwrap().unwrap().upvote_count,
            u32::MAX
        );
    }

    #[test]
    fn upvote_missing_discussion_fails() {
        let db = test_db();
        assert!(matches!(
            upvote_discussion(db.conn(), 3),
            Err(Error::DiscussionNotFound(3))
        ));
    }
}
