//! stockpile-store: ownership-scoped item storage
//!
//! Provides the ownership policy, the `ItemStore`/`BlogStore` adapter
//! traits and their backends for the stockpile inventory server.
//!
//! ## Features
//!
//! | Feature  | Description                    |
//! |----------|--------------------------------|
//! | (none)   | In-memory backends only        |
//! | `sqlite` | SQLite persistence             |
//!
//! ## Example
//!
//! ```rust,ignore
//! use stockpile_store::{
//!     InMemoryItemStore, ItemStore, NewItem, Page, Visibility,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryItemStore::new();
//!
//!     // Insert an item owned by the caller
//!     let item = store.insert(NewItem::default(), "u1").await?;
//!
//!     // List what the caller may see, first page
//!     let visible = Visibility::for_caller(Some("u1"), false);
//!     let items = store.list(&visible, &Page::default()).await?;
//!
//!     Ok(())
//! }
//! ```

mod error;
mod item;
mod policy;
mod store;

pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

// Re-exports
pub use error::{StoreError, StoreResult};
pub use item::{Blog, Item, NewItem};
pub use policy::{permits, Page, Visibility, DEFAULT_PAGE_LIMIT, WILDCARD_OWNER};
pub use store::{BlogStore, ItemStore};

pub use memory::{InMemoryBlogStore, InMemoryItemStore};

#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteBlogStore, SqliteItemStore};
