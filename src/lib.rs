pub mod config;
pub mod error;
pub mod state;
pub mod notify;
pub mod relay;
pub mod routes;
pub mod submission;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::notify::Notifier;
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config, notifier: Arc<dyn Notifier>) -> Router {
    if config.is_telegram_configured() {
        tracing::info!("Telegram relay configured");
    } else {
        tracing::warn!("BOT_TOKEN or ADMIN_ID missing; submissions will be refused");
    }

    let static_dir = config.static_dir.clone();
    let landing_page = static_dir.join("index.html");
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState { config, notifier });

    let router = Router::new()
        .merge(routes::api_routes())
        .nest_service("/static", ServeDir::new(&static_dir));

    let router = if landing_page.is_file() {
        router.route_service("/", ServeFile::new(landing_page))
    } else {
        router.route("/", get(routes::health::status))
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body_size))
                .layer(cors)
                .layer(DefaultBodyLimit::disable()),
        )
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}
