use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::state::AppState;

mod blogs;
mod health;
mod items;
mod tokens;

pub fn router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .route("/", get(health::root))
        .route("/get-token", post(tokens::issue_token))
        .route("/get-items", post(items::list_items))
        .route("/get-item", post(items::get_item))
        .route("/update-item", post(items::update_item))
        .route("/add-item", post(items::add_item))
        .route("/delete-item", post(items::delete_item))
        .route("/get-items-count", post(items::count_items))
        .route("/get-blogs", post(blogs::list_blogs))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
