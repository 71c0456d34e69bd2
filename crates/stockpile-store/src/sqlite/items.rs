//! SQLite item store

use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};

use super::schema::init_schema;
use crate::error::{StoreError, StoreResult};
use crate::item::{Item, NewItem};
use crate::policy::{permits, Page, Visibility, WILDCARD_OWNER};
use crate::store::ItemStore;

/// SQLite-backed item store
pub struct SqliteItemStore {
    conn: Mutex<Connection>,
}

impl SqliteItemStore {
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

    fn owner_of(conn: &Connection, id: &str) -> StoreResult<String> {
        conn.query_row("SELECT owner FROM items WHERE id = ?", [id], |row| {
            row.get(0)
        })
        .optional()?
        .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

/// WHERE fragment and bound owners for a visibility filter.
fn visibility_sql(visibility: &Visibility) -> (&'static str, Vec<String>) {
    match visibility {
        Visibility::Shared => ("owner = ?", vec![WILDCARD_OWNER.to_string()]),
        Visibility::SharedOr(id) => (
            "(owner = ? OR owner = ?)",
            vec![WILDCARD_OWNER.to_string(), id.clone()],
        ),
        Visibility::OwnedBy(id) => ("owner = ?", vec![id.clone()]),
    }
}

fn item_from_row(
    id: String,
    owner: String,
    quantity: i64,
    sold: i64,
    attrs_json: String,
    created_at: i64,
) -> Option<Item> {
    let attrs: Map<String, Value> = serde_json::from_str(&attrs_json).ok()?;
    Some(Item {
        id,
        owner,
        quantity,
        sold,
        created_at: created_at as u64,
        attrs,
    })
}

#[async_trait]
impl ItemStore for SqliteItemStore {
    async fn list(&self, visibility: &Visibility, page: &Page) -> StoreResult<Vec<Item>> {
        let conn = self.conn.lock().unwrap();
        let (clause, owners) = visibility_sql(visibility);

        let sql = format!(
            "SELECT id, owner, quantity, sold, attrs, created_at FROM items \
             WHERE {clause} ORDER BY rowid LIMIT ? OFFSET ?"
        );
        let mut stmt = conn.prepare(&sql)?;

        let mut args: Vec<rusqlite::types::Value> =
            owners.into_iter().map(rusqlite::types::Value::from).collect();
        args.push((page.limit as i64).into());
        args.push((page.offset() as i64).into());

        let items = stmt
            .query_map(rusqlite::params_from_iter(args), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, i64>(5)?,
                ))
            })?
            .filter_map(|r| r.ok())
            .filter_map(|(id, owner, quantity, sold, attrs, created_at)| {
                item_from_row(id, owner, quantity, sold, attrs, created_at)
            })
            .collect();

        Ok(items)
    }

    async fn count(&self, visibility: &Visibility) -> StoreResult<u64> {
        let conn = self.conn.lock().unwrap();
        let (clause, owners) = visibility_sql(visibility);

        let sql = format!("SELECT COUNT(*) FROM items WHERE {clause}");
        let args: Vec<rusqlite::types::Value> =
            owners.into_iter().map(rusqlite::types::Value::from).collect();

        let count: i64 =
            conn.query_row(&sql, rusqlite::params_from_iter(args), |row| row.get(0))?;

        Ok(count as u64)
    }

    async fn get(&self, id: &str, caller: Option<&str>) -> StoreResult<Item> {
        let conn = self.conn.lock().unwrap();

        let row = conn
            .query_row(
                "SELECT id, owner, quantity, sold, attrs, created_at FROM items WHERE id = ?",
                [id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, i64>(5)?,
                    ))
                },
            )
            .optional()?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        // Ownership is decided before any payload leaves the store
        if !permits(&row.1, caller) {
            return Err(StoreError::NotAuthorized(format!(
                "item {id} is not visible to this caller"
            )));
        }

        let (id, owner, quantity, sold, attrs, created_at) = row;
        item_from_row(id.clone(), owner, quantity, sold, attrs, created_at)
            .ok_or_else(|| StoreError::Storage(format!("corrupt attrs for item {id}")))
    }

    async fn insert(&self, draft: NewItem, owner: &str) -> StoreResult<Item> {
        let item = Item::materialize(draft, owner);
        let attrs_json =
            serde_json::to_string(&item.attrs).map_err(|e| StoreError::Storage(e.to_string()))?;

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO items (id, owner, quantity, sold, attrs, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                item.id,
                item.owner,
                item.quantity,
                item.sold,
                attrs_json,
                item.created_at as i64,
            ],
        )?;

        Ok(item)
    }

    async fn sell(&self, id: &str, caller: &str) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        let owner = Self::owner_of(&conn, id)?;
        if !permits(&owner, Some(caller)) {
            return Err(StoreError::NotAuthorized(format!(
                "item {id} is not writable by this caller"
            )));
        }

        // Quantity check and counter update in one statement; rows
        // affected distinguishes an out-of-stock item.
        let changed = conn.execute(
            "UPDATE items SET quantity = quantity - 1, sold = sold + 1 \
             WHERE id = ? AND quantity > 0",
            [id],
        )?;
        if changed == 0 {
            return Err(StoreError::OutOfStock(id.to_string()));
        }

        Ok(())
    }

    async fn restock(&self, id: &str, amount: i64, caller: &str) -> StoreResult<()> {
        if amount < 0 {
            return Err(StoreError::NegativeAmount(amount));
        }

        let conn = self.conn.lock().unwrap();

        let owner = Self::owner_of(&conn, id)?;
        if !permits(&owner, Some(caller)) {
            return Err(StoreError::NotAuthorized(format!(
                "item {id} is not writable by this caller"
            )));
        }

        conn.execute(
            "UPDATE items SET quantity = quantity + ?1 WHERE id = ?2",
            params![amount, id],
        )?;

        Ok(())
    }

    async fn delete(&self, id: &str, caller: &str) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        let owner = Self::owner_of(&conn, id)?;
        if !permits(&owner, Some(caller)) {
            return Err(StoreError::NotAuthorized(format!(
                "item {id} is not writable by this caller"
            )));
        }

        conn.execute("DELETE FROM items WHERE id = ?", [id])?;
        Ok(())
    }
}
