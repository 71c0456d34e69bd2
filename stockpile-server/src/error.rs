use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use stockpile_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, text) = match &self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".into(),
                )
            }
        };

        // Every error shares the response envelope
        (status, Json(json!({ "ok": false, "text": text }))).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServerError::NotFound(format!("item {id} not found")),
            StoreError::NotAuthorized(msg) => ServerError::Unauthorized(msg),
            StoreError::OutOfStock(id) => {
                ServerError::BadRequest(format!("item {id} is out of stock"))
            }
            StoreError::NegativeAmount(amount) => ServerError::BadRequest(format!(
                "restock amount must be non-negative, got {amount}"
            )),
            StoreError::InvalidQuantity(value) => {
                ServerError::BadRequest(format!("quantity must be a non-negative integer, got {value}"))
            }
            other => ServerError::Internal(other.to_string()),
        }
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
