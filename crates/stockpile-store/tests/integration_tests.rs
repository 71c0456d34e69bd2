//! Integration tests: policy + store adapters working together

use std::sync::Arc;

use serde_json::{json, Map};
use stockpile_store::{
    InMemoryItemStore, ItemStore, NewItem, Page, StoreError, Visibility, WILDCARD_OWNER,
};

fn draft(name: &str, quantity: i64) -> NewItem {
    let mut attrs = Map::new();
    attrs.insert("name".into(), json!(name));
    NewItem { quantity, attrs }
}

#[tokio::test]
async fn test_widget_lifecycle() {
    let store = InMemoryItemStore::new();

    // Insert {name:"Widget", quantity:3} as u1
    let item = store.insert(draft("Widget", 3), "u1").await.unwrap();
    assert_eq!(item.owner, "u1");
    assert_eq!(item.quantity, 3);
    assert_eq!(item.sold, 0);

    // Sell it three times
    for _ in 0..3 {
        store.sell(&item.id, "u1").await.unwrap();
    }
    let state = store.get(&item.id, Some("u1")).await.unwrap();
    assert_eq!(state.quantity, 0);
    assert_eq!(state.sold, 3);

    // Fourth sell rejected, state unchanged
    assert!(matches!(
        store.sell(&item.id, "u1").await,
        Err(StoreError::OutOfStock(_))
    ));
    let state = store.get(&item.id, Some("u1")).await.unwrap();
    assert_eq!(state.quantity, 0);
    assert_eq!(state.sold, 3);

    // Restock by 5
    store.restock(&item.id, 5, "u1").await.unwrap();
    let state = store.get(&item.id, Some("u1")).await.unwrap();
    assert_eq!(state.quantity, 5);
    assert_eq!(state.sold, 3);
}

#[tokio::test]
async fn test_visibility_matrix() {
    let store = InMemoryItemStore::new();

    let shared = store.insert(draft("shared", 1), WILDCARD_OWNER).await.unwrap();
    let owned = store.insert(draft("owned", 1), "u1").await.unwrap();

    // Shared: anyone reads and writes
    store.get(&shared.id, None).await.unwrap();
    store.get(&shared.id, Some("u2")).await.unwrap();
    store.sell(&shared.id, "u2").await.unwrap();

    // Owned: only u1
    store.get(&owned.id, Some("u1")).await.unwrap();
    assert!(matches!(
        store.get(&owned.id, Some("u2")).await,
        Err(StoreError::NotAuthorized(_))
    ));
    assert!(matches!(
        store.sell(&owned.id, "u2").await,
        Err(StoreError::NotAuthorized(_))
    ));

    // Anonymous listing is exactly the wildcard set
    let listed = store
        .list(&Visibility::for_caller(None, false), &Page::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, shared.id);
}

#[tokio::test]
async fn test_pagination_windows() {
    let store = InMemoryItemStore::new();
    for i in 0..25 {
        store
            .insert(draft(&format!("item-{i}"), 1), WILDCARD_OWNER)
            .await
            .unwrap();
    }

    let mut seen = Vec::new();
    for page in 0..3 {
        let chunk = store
            .list(&Visibility::Shared, &Page::new(page, 10))
            .await
            .unwrap();
        seen.extend(chunk.into_iter().map(|item| item.id));
    }

    // Three windows cover the whole set exactly once
    assert_eq!(seen.len(), 25);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 25);
}

#[tokio::test]
async fn test_concurrent_sells_never_oversell() {
    let store = Arc::new(InMemoryItemStore::new());
    let item = store.insert(draft("hot", 20), WILDCARD_OWNER).await.unwrap();

    // 25 concurrent sells against 20 units: exactly 20 succeed
    let mut handles = Vec::new();
    for i in 0..25 {
        let store = Arc::clone(&store);
        let id = item.id.clone();
        handles.push(tokio::spawn(async move {
            store.sell(&id, &format!("buyer-{i}")).await
        }));
    }

    let mut sold = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => sold += 1,
            Err(StoreError::OutOfStock(_)) => rejected += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(sold, 20);
    assert_eq!(rejected, 5);

    let state = store.get(&item.id, None).await.unwrap();
    assert_eq!(state.quantity, 0);
    assert_eq!(state.sold, 20);
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use stockpile_store::SqliteItemStore;

    #[tokio::test]
    async fn test_widget_lifecycle_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockpile.db");
        let path = path.to_str().unwrap();

        let item_id = {
            let store = SqliteItemStore::open(path).unwrap();
            let item = store.insert(draft("Widget", 3), "u1").await.unwrap();
            for _ in 0..3 {
                store.sell(&item.id, "u1").await.unwrap();
            }
            item.id
        };

        // Reopen: the record and its counters survived
        let store = SqliteItemStore::open(path).unwrap();
        let item = store.get(&item_id, Some("u1")).await.unwrap();
        assert_eq!(item.quantity, 0);
        assert_eq!(item.sold, 3);

        assert!(matches!(
            store.sell(&item_id, "u1").await,
            Err(StoreError::OutOfStock(_))
        ));

        store.restock(&item_id, 5, "u1").await.unwrap();
        let item = store.get(&item_id, Some("u1")).await.unwrap();
        assert_eq!(item.quantity, 5);
    }

    #[tokio::test]
    async fn test_concurrent_sells_on_sqlite() {
        let store = Arc::new(SqliteItemStore::in_memory().unwrap());
        let item = store.insert(draft("hot", 10), WILDCARD_OWNER).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..12 {
            let store = Arc::clone(&store);
            let id = item.id.clone();
            handles.push(tokio::spawn(async move {
                store.sell(&id, &format!("buyer-{i}")).await
            }));
        }

        let outcomes: Vec<_> = {
            let mut v = Vec::new();
            for handle in handles {
                v.push(handle.await.unwrap());
            }
            v
        };
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 10);

        let state = store.get(&item.id, None).await.unwrap();
        assert_eq!(state.quantity, 0);
        assert_eq!(state.sold, 10);
    }
}
