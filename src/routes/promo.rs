use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::relay::{self, RelayOutcome};
use crate::state::SharedState;
use crate::submission::PromoRequest;

pub async fn unlock_promo(
    State(state): State<SharedState>,
    payload: Result<Json<PromoRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;

    let outcome =
        relay::handle_submission(&state.config, state.notifier.as_ref(), request).await?;

    if let RelayOutcome::AdminOnly { .. } = outcome {
        tracing::debug!("Submission relayed without user acknowledgment");
    }

    Ok(Json(json!({
        "success": true,
        "message": "Submission sent to admin",
    })))
}
