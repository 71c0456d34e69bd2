use std::sync::Arc;

use stockpile_store::{
    BlogStore, InMemoryBlogStore, InMemoryItemStore, ItemStore, SqliteBlogStore, SqliteItemStore,
};

use crate::config::Config;
use crate::middleware::TokenSigner;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemStore>,
    pub blogs: Arc<dyn BlogStore>,
    pub tokens: Arc<TokenSigner>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let (items, blogs): (Arc<dyn ItemStore>, Arc<dyn BlogStore>) =
            match config.storage.backend.as_str() {
                "sqlite" => {
                    let path = config
                        .storage
                        .sqlite_path
                        .as_ref()
                        .ok_or_else(|| anyhow::anyhow!("sqlite storage requires sqlite_path"))?;
                    (
                        Arc::new(SqliteItemStore::open(path)?),
                        Arc::new(SqliteBlogStore::open(path)?),
                    )
                }
                "memory" => (
                    Arc::new(InMemoryItemStore::new()),
                    Arc::new(InMemoryBlogStore::new()),
                ),
                other => {
                    anyhow::bail!(
                        "Unknown storage backend '{}'. Valid options: 'memory', 'sqlite'",
                        other
                    );
                }
            };

        let tokens = TokenSigner::new(config.token_secret.as_bytes(), config.token_ttl_secs);

        Ok(Self {
            items,
            blogs,
            tokens: Arc::new(tokens),
            config: Arc::new(config.clone()),
        })
    }
}
