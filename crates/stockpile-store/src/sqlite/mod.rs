//! SQLite store backends

mod blogs;
mod items;
mod schema;

pub use blogs::SqliteBlogStore;
pub use items::SqliteItemStore;
