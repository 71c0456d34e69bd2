//! SQLite blog store

use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde_json::{Map, Value};

use super::schema::init_schema;
use crate::error::{StoreError, StoreResult};
use crate::item::Blog;
use crate::store::BlogStore;

/// SQLite-backed blog store
pub struct SqliteBlogStore {
    conn: Mutex<Connection>,
}

impl SqliteBlogStore {
    /// Open or create a database at the given path
    pub fn open(path: &str) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl BlogStore for SqliteBlogStore {
    async fn list(&self) -> StoreResult<Vec<Blog>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, attrs FROM blogs ORDER BY rowid")?;

        let blogs = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .filter_map(|r| r.ok())
            .filter_map(|(id, attrs_json)| {
                let attrs: Map<String, Value> = serde_json::from_str(&attrs_json).ok()?;
                Some(Blog { id, attrs })
            })
            .collect();

        Ok(blogs)
    }

    async fn insert(&self, attrs: Map<String, Value>) -> StoreResult<Blog> {
        let blog = Blog::materialize(attrs);
        let attrs_json =
            serde_json::to_string(&blog.attrs).map_err(|e| StoreError::Storage(e.to_string()))?;

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO blogs (id, attrs) VALUES (?1, ?2)",
            params![blog.id, attrs_json],
        )?;

        Ok(blog)
    }
}
