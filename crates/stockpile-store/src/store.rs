//! Store adapter traits

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreResult;
use crate::item::{Blog, Item, NewItem};
use crate::policy::{Page, Visibility};

/// Item persistence with the ownership policy enforced at the adapter.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// List items matching the visibility filter, ordered by insertion.
    async fn list(&self, visibility: &Visibility, page: &Page) -> StoreResult<Vec<Item>>;

    /// Count items matching the visibility filter.
    async fn count(&self, visibility: &Visibility) -> StoreResult<u64>;

    /// Fetch a single item.
    ///
    /// The ownership check runs before any payload is returned; a caller
    /// the policy denies never sees the record contents.
    async fn get(&self, id: &str, caller: Option<&str>) -> StoreResult<Item>;

    /// Persist a new item owned by `owner` and return the stored record
    /// with its assigned identifier.
    async fn insert(&self, draft: NewItem, owner: &str) -> StoreResult<Item>;

    /// Sell one unit: `quantity -= 1, sold += 1`.
    ///
    /// The quantity check and the counter update are a single atomic
    /// step; concurrent sells can never drive quantity negative.
    async fn sell(&self, id: &str, caller: &str) -> StoreResult<()>;

    /// Restock by a non-negative amount: `quantity += amount`.
    async fn restock(&self, id: &str, amount: i64, caller: &str) -> StoreResult<()>;

    /// Remove an item. Only its owner (or anyone, for shared items) may.
    async fn delete(&self, id: &str, caller: &str) -> StoreResult<()>;
}

/// Blog collection: unauthenticated, unfiltered reads.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Full-collection read, insertion order.
    async fn list(&self) -> StoreResult<Vec<Blog>>;

    /// Insert a post (seeding and tests).
    async fn insert(&self, attrs: Map<String, Value>) -> StoreResult<Blog>;
}
