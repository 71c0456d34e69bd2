//! In-memory blog store

use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreResult;
use crate::item::Blog;
use crate::store::BlogStore;

/// In-memory blog store for tests and development
#[derive(Default)]
pub struct InMemoryBlogStore {
    posts: RwLock<Vec<Blog>>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogStore for InMemoryBlogStore {
    async fn list(&self) -> StoreResult<Vec<Blog>> {
        Ok(self.posts.read().unwrap().clone())
    }

    async fn insert(&self, attrs: Map<String, Value>) -> StoreResult<Blog> {
        let blog = Blog::materialize(attrs);
        self.posts.write().unwrap().push(blog.clone());
        Ok(blog)
    }
}
