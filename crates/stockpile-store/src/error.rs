//! Store error types

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item not found: {0}")]
    NotFound(String),

    #[error("not authorized: {0}")]
    NotAuthorized(String),

    #[error("out of stock: {0}")]
    OutOfStock(String),

    #[error("negative restock amount: {0}")]
    NegativeAmount(i64),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[cfg(feature = "sqlite")]
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}
