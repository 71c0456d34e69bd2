use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use stockpile_store::{Item, ItemStore, NewItem, Page, Visibility, DEFAULT_PAGE_LIMIT};

use crate::error::{ServerError, ServerResult};
use crate::middleware::authenticate;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ItemsResponse {
    pub ok: bool,
    pub text: String,
    pub items: Vec<Item>,
}

#[derive(Serialize)]
pub struct ItemResponse {
    pub ok: bool,
    pub text: String,
    pub item: Item,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub ok: bool,
    pub text: String,
}

#[derive(Serialize)]
pub struct CountResponse {
    pub ok: bool,
    pub count: u64,
}

fn required<'a>(field: &'a Option<String>, name: &str) -> ServerResult<&'a str> {
    field
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::BadRequest(format!("{name} missing or empty")))
}

/// Validate caller-supplied pagination; garbage is rejected, not coerced.
fn parse_page(page: Option<i64>, limit: Option<i64>) -> ServerResult<Page> {
    let page = match page {
        Some(p) if p < 0 => {
            return Err(ServerError::BadRequest("page must be non-negative".into()));
        }
        Some(p) => p as u64,
        None => 0,
    };
    let limit = match limit {
        Some(l) if l <= 0 => {
            return Err(ServerError::BadRequest("limit must be positive".into()));
        }
        Some(l) => l as u64,
        None => DEFAULT_PAGE_LIMIT,
    };
    Ok(Page::new(page, limit))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsRequest {
    pub identifier: Option<String>,
    pub token: Option<String>,
    #[serde(default)]
    pub mine_only: bool,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// POST /get-items
///
/// Anonymous callers see the shared set; authenticated callers see
/// shared plus their own, or only their own with `mineOnly`.
pub async fn list_items(
    State(state): State<AppState>,
    Json(body): Json<ListItemsRequest>,
) -> ServerResult<Json<ItemsResponse>> {
    let caller = match body.identifier.as_deref().filter(|s| !s.is_empty()) {
        Some(identifier) => Some(authenticate(
            &state.tokens,
            Some(identifier),
            body.token.as_deref(),
        )?),
        None => None,
    };

    let page = parse_page(body.page, body.limit)?;
    let visibility = Visibility::for_caller(caller.as_deref(), body.mine_only);
    let items = state.items.list(&visibility, &page).await?;

    Ok(Json(ItemsResponse {
        ok: true,
        text: "success".into(),
        items,
    }))
}

#[derive(Deserialize)]
pub struct GetItemRequest {
    pub identifier: Option<String>,
    pub token: Option<String>,
    pub id: Option<String>,
}

/// POST /get-item
pub async fn get_item(
    State(state): State<AppState>,
    Json(body): Json<GetItemRequest>,
) -> ServerResult<Json<ItemResponse>> {
    let id = required(&body.id, "id")?;
    let caller = authenticate(&state.tokens, body.identifier.as_deref(), body.token.as_deref())?;

    let item = state.items.get(id, Some(&caller)).await?;

    Ok(Json(ItemResponse {
        ok: true,
        text: "success".into(),
        item,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub identifier: Option<String>,
    pub token: Option<String>,
    pub id: Option<String>,
    pub restock_amount: Option<i64>,
}

/// POST /update-item
///
/// Without `restockAmount` this is a sell; with it, a restock.
pub async fn update_item(
    State(state): State<AppState>,
    Json(body): Json<UpdateItemRequest>,
) -> ServerResult<Json<StatusResponse>> {
    let id = required(&body.id, "id")?;
    let caller = authenticate(&state.tokens, body.identifier.as_deref(), body.token.as_deref())?;

    match body.restock_amount {
        Some(amount) => state.items.restock(id, amount, &caller).await?,
        None => state.items.sell(id, &caller).await?,
    }

    Ok(Json(StatusResponse {
        ok: true,
        text: "ok".into(),
    }))
}

#[derive(Deserialize)]
pub struct AddItemRequest {
    pub identifier: Option<String>,
    pub token: Option<String>,
    pub item: Option<Map<String, Value>>,
}

/// POST /add-item
pub async fn add_item(
    State(state): State<AppState>,
    Json(body): Json<AddItemRequest>,
) -> ServerResult<Json<ItemResponse>> {
    let caller = authenticate(&state.tokens, body.identifier.as_deref(), body.token.as_deref())?;
    let payload = body
        .item
        .ok_or_else(|| ServerError::BadRequest("item missing".into()))?;

    // The owner always comes from the verified caller, never the payload
    let draft = NewItem::from_payload(payload)?;
    let item = state.items.insert(draft, &caller).await?;

    Ok(Json(ItemResponse {
        ok: true,
        text: "item added".into(),
        item,
    }))
}

#[derive(Deserialize)]
pub struct DeleteItemRequest {
    pub identifier: Option<String>,
    pub token: Option<String>,
    pub id: Option<String>,
}

/// POST /delete-item
pub async fn delete_item(
    State(state): State<AppState>,
    Json(body): Json<DeleteItemRequest>,
) -> ServerResult<Json<StatusResponse>> {
    let id = required(&body.id, "id")?;
    let caller = authenticate(&state.tokens, body.identifier.as_deref(), body.token.as_deref())?;

    state.items.delete(id, &caller).await?;

    Ok(Json(StatusResponse {
        ok: true,
        text: "deleted successfully".into(),
    }))
}

#[derive(Deserialize)]
pub struct CountItemsRequest {
    pub identifier: Option<String>,
}

/// POST /get-items-count
///
/// Read-only count of what the (asserted) caller could list.
pub async fn count_items(
    State(state): State<AppState>,
    Json(body): Json<CountItemsRequest>,
) -> ServerResult<Json<CountResponse>> {
    let caller = body.identifier.as_deref().filter(|s| !s.is_empty());
    let visibility = Visibility::for_caller(caller, false);
    let count = state.items.count(&visibility).await?;

    Ok(Json(CountResponse { ok: true, count }))
}
