use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::SharedState;

/// Reports whether the Telegram credential and admin recipient are configured.
pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    let bot_token = state.config.bot_token.is_some();
    let admin_id = state.config.admin_id.is_some();

    let status = if bot_token && admin_id { "ok" } else { "degraded" };

    Json(json!({
        "status": status,
        "botToken": bot_token,
        "adminId": admin_id,
    }))
}

/// Fallback for `GET /` when no landing page is deployed.
pub async fn status() -> Json<Value> {
    Json(json!({ "status": "running" }))
}
