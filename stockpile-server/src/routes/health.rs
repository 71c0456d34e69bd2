use axum::Json;
use serde_json::{json, Value};

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "ok": true, "data": "Ok" }))
}
