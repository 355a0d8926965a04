//! HTTP adapters - REST API implementations.

pub mod chat;

pub use chat::{chat_router, ChatAppState};

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Builds the full application router with tracing, CORS and timeouts.
pub fn app_router(state: ChatAppState, server: &ServerConfig) -> Router {
    chat_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(server.request_timeout()))
                .layer(cors_layer(server)),
        )
        .with_state(state)
}

/// Configured origins only; any origin when none are configured outside
/// production.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if !origins.is_empty() {
        base.allow_origin(AllowOrigin::list(origins))
    } else if server.is_production() {
        base
    } else {
        base.allow_origin(Any)
    }
}
