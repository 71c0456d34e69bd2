//! In-memory item store

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::item::{Item, NewItem};
use crate::policy::{permits, Page, Visibility};
use crate::store::ItemStore;

/// In-memory item store for tests and development
#[derive(Default)]
pub struct InMemoryItemStore {
    /// Insertion-ordered, matching the persistent backend's listing order.
    items: RwLock<Vec<Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items, all owners.
    pub fn len(&self) -> usize {
        self.items.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().unwrap().is_empty()
    }

    /// Clear all data
    pub fn clear(&self) {
        self.items.write().unwrap().clear();
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn list(&self, visibility: &Visibility, page: &Page) -> StoreResult<Vec<Item>> {
        let items = self.items.read().unwrap();
        Ok(items
            .iter()
            .filter(|item| visibility.matches(&item.owner))
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, visibility: &Visibility) -> StoreResult<u64> {
        let items = self.items.read().unwrap();
        Ok(items
            .iter()
            .filter(|item| visibility.matches(&item.owner))
            .count() as u64)
    }

    async fn get(&self, id: &str, caller: Option<&str>) -> StoreResult<Item> {
        let items = self.items.read().unwrap();
        let item = items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if !permits(&item.owner, caller) {
            return Err(StoreError::NotAuthorized(format!(
                "item {id} is not visible to this caller"
            )));
        }

        Ok(item.clone())
    }

    async fn insert(&self, draft: NewItem, owner: &str) -> StoreResult<Item> {
        let item = Item::materialize(draft, owner);
        self.items.write().unwrap().push(item.clone());
        Ok(item)
    }

    async fn sell(&self, id: &str, caller: &str) -> StoreResult<()> {
        // Single write-lock section: the quantity check and the counter
        // update cannot interleave with a concurrent sell.
        let mut items = self.items.write().unwrap();
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if !permits(&item.owner, Some(caller)) {
            return Err(StoreError::NotAuthorized(format!(
                "item {id} is not writable by this caller"
            )));
        }
        if item.quantity <= 0 {
            return Err(StoreError::OutOfStock(id.to_string()));
        }

        item.quantity -= 1;
        item.sold += 1;
        Ok(())
    }

    async fn restock(&self, id: &str, amount: i64, caller: &str) -> StoreResult<()> {
        if amount < 0 {
            return Err(StoreError::NegativeAmount(amount));
        }

        let mut items = self.items.write().unwrap();
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if !permits(&item.owner, Some(caller)) {
            return Err(StoreError::NotAuthorized(format!(
                "item {id} is not writable by this caller"
            )));
        }

        item.quantity += amount;
        Ok(())
    }

    async fn delete(&self, id: &str, caller: &str) -> StoreResult<()> {
        let mut items = self.items.write().unwrap();
        let index = items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if !permits(&items[index].owner, Some(caller)) {
            return Err(StoreError::NotAuthorized(format!(
                "item {id} is not writable by this caller"
            )));
        }

        items.remove(index);
        Ok(())
    }
}
