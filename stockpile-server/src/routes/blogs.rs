use axum::{Json, extract::State};
use serde::Serialize;
use stockpile_store::{Blog, BlogStore};

use crate::error::ServerResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct BlogsResponse {
    pub ok: bool,
    pub text: String,
    pub blogs: Vec<Blog>,
}

/// POST /get-blogs
///
/// Unauthenticated full-collection read; no ownership applies.
pub async fn list_blogs(State(state): State<AppState>) -> ServerResult<Json<BlogsResponse>> {
    let blogs = state.blogs.list().await?;

    Ok(Json(BlogsResponse {
        ok: true,
        text: "success".into(),
        blogs,
    }))
}
