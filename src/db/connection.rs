use rusqlite::Connection;

use crate::error::Result;

use super::migrations;

/// Database handle for forum operations.
///
/// Always backed by a private in-memory SQLite database: every handle starts
/// empty and nothing outlives it.
#[derive(Debug)]
pub struct ForumDb {
    conn: Connection,
}

impl ForumDb {
    /// Open a fresh, fully migrated in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;

        migrations::run_migrations(&conn)?;

        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_in_memory_enables_foreign_keys() {
        let db = ForumDb::open_in_memory().unwrap();
        let enabled: i32 = db
            .conn()
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn handles_do_not_share_state() {
        let a = ForumDb::open_in_memory().unwrap();
        let b = ForumDb::open_in_memory().unwrap();

        a.conn()
            .execute(
                "INSERT INTO discussions (community_id, title, content, author, timestamp)
                 VALUES ('1', 'Only in a', '', 'alice', '2024-01-01T00:00:00Z')",
                [],
            )
            .unwrap();

        let count: i64 = b
            .conn()
            .query_row("SELECT COUNT(*) FROM discussions", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn comment_requires_existing_discussion() {
        let db = ForumDb::open_in_memory().unwrap();
        let result = db.conn().execute(
            "INSERT INTO comments (discussion_id, content, author, timestamp)
             VALUES (42, 'orphan', 'bob', '2024-01-01T00:00:00Z')",
            [],
        );
        assert!(result.is_err());
    }
}
