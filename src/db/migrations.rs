use rusqlite::Connection;

use crate::error::Result;

#[allow(dead_code)] // Used in tests
pub const LATEST_SCHEMA_VERSION: i32 = 1;

/// Run all pending migrations on the database
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if current_version < 1 {
        migrate_v0_to_v1(conn)?;
    }

    Ok(())
}

/// Initial schema creation (v0 -> v1)
fn migrate_v0_to_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE discussions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            community_id TEXT NOT NULL,
            title TEXT NOT NULL CHECK (length(trim(title)) > 0),
            content TEXT NOT NULL,
            author TEXT NOT NULL,
            tags TEXT NOT NULL DEFAULT '[]',
            link_url TEXT,
            timestamp TEXT NOT NULL,
            upvote_count INTEGER NOT NULL DEFAULT 0 CHECK (upvote_count >= 0),
            comment_count INTEGER NOT NULL DEFAULT 0 CHECK (comment_count >= 0)
        );

        -- Flat comment table; the reply tree is derived from parent_id on read
        CREATE TABLE comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            discussion_id INTEGER NOT NULL REFERENCES discussions(id),
            parent_id INTEGER REFERENCES comments(id),
            content TEXT NOT NULL CHECK (length(trim(content)) > 0),
            author TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            upvote_count INTEGER NOT NULL DEFAULT 0 CHECK (upvote_count >= 0)
        );

        CREATE TRIGGER comments_parent_same_discussion BEFORE INSERT ON comments
        WHEN new.parent_id IS NOT NULL AND NOT EXISTS (
            SELECT 1 FROM comments WHERE id = new.parent_id AND discussion_id = new.discussion_id
        )
        BEGIN
            SELECT RAISE(ABORT, 'parent comment must belong to the same discussion');
        END;

        CREATE TRIGGER comments_immutable BEFORE UPDATE OF discussion_id, parent_id, content, author, timestamp ON comments
        BEGIN
            SELECT RAISE(ABORT, 'comment fields are immutable');
        END;

        CREATE TRIGGER comments_upvotes_monotonic BEFORE UPDATE OF upvote_count ON comments
        WHEN new.upvote_count < old.upvote_count
        BEGIN
            SELECT RAISE(ABORT, 'upvote_count never decreases');
        END;

        CREATE TRIGGER discussions_comment_count_monotonic BEFORE UPDATE OF comment_count ON discussions
        WHEN new.comment_count < old.comment_count
        BEGIN
            SELECT RAISE(ABORT, 'comment_count never decreases');
        END;

        CREATE INDEX idx_discussions_community ON discussions(community_id);
        CREATE INDEX idx_discussions_timestamp ON discussions(timestamp);
        CREATE INDEX idx_comments_discussion ON comments(discussion_id);
        CREATE INDEX idx_comments_parent ON comments(parent_id);

        PRAGMA user_version = 1;
        "#,
    )?;

    Ok(())
}
