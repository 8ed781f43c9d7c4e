pub mod health;
pub mod promo;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/unlock-promo", post(promo::unlock_promo))
        .route("/health", get(health::health))
}
