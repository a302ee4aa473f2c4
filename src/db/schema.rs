// Database schema — table creation and migrations.
//
// We use a simple version-based migration approach: a `schema_version` table
// tracks which migrations have run, and each migration is a function that
// executes SQL statements.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Metadata for the persisted retrieval index (singleton row)
        CREATE TABLE IF NOT EXISTS index_meta (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            source TEXT NOT NULL,              -- JSON file the corpus came from
            model TEXT NOT NULL,               -- embedding model used
            total_chunks INTEGER NOT NULL,     -- chunks the splitter produced
            indexed_chunks INTEGER NOT NULL,   -- chunks actually embedded
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- The embedded chunks backing similarity search
        CREATE TABLE IF NOT EXISTS index_chunks (
            chunk_index INTEGER PRIMARY KEY,   -- position in the split output
            start_index INTEGER NOT NULL,      -- char offset in the compiled text
            content TEXT NOT NULL,
            embedding TEXT NOT NULL,           -- JSON array of floats
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )
    .context("Failed to create database tables")?;

    // Record initial schema version if not already set
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Count the number of tables in the database (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        // Running create_tables twice should not error
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_table_count() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let count = table_count(&conn).unwrap();
        // schema_version, index_meta, index_chunks = 3 tables
        assert_eq!(count, 3i64);
    }
}
