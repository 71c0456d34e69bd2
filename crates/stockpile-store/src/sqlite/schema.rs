//! SQLite schema definitions

use rusqlite::Connection;

use crate::error::StoreResult;

pub const SCHEMA_VERSION: u32 = 1;

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        r#"
        -- Schema version tracking
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );

        -- Inventory items
        CREATE TABLE IF NOT EXISTS items (
            id TEXT PRIMARY KEY,                   -- store-assigned UUID
            owner TEXT NOT NULL,                   -- caller id or '*'
            quantity INTEGER NOT NULL CHECK (quantity >= 0),
            sold INTEGER NOT NULL DEFAULT 0,
            attrs TEXT NOT NULL,                   -- JSON object of caller attributes
            created_at INTEGER NOT NULL            -- Unix timestamp
        );

        CREATE INDEX IF NOT EXISTS idx_items_owner
            ON items(owner);

        -- Blog posts
        CREATE TABLE IF NOT EXISTS blogs (
            id TEXT PRIMARY KEY,
            attrs TEXT NOT NULL                    -- JSON object
        );
    "#,
    )?;

    // Set schema version
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (version) VALUES (?)",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Check schema version
#[allow(dead_code)]
pub fn check_version(conn: &Connection) -> StoreResult<u32> {
    let version: u32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);
    Ok(version)
}
