use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TokenRequest {
    pub identifier: Option<String>,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub ok: bool,
    pub text: String,
    pub token: String,
}

/// POST /get-token
///
/// Mints a token for any submitted identifier; there is no account
/// registry to check against.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(body): Json<TokenRequest>,
) -> ServerResult<Json<TokenResponse>> {
    let identifier = body
        .identifier
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::BadRequest("identifier missing or empty".into()))?;

    let token = state.tokens.issue(identifier)?;

    Ok(Json(TokenResponse {
        ok: true,
        text: "ok".into(),
        token,
    }))
}
