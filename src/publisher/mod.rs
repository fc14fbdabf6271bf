//! Publisher side: the `/events` SSE endpoint, per-subscription emission
//! streams, and system routes.

pub mod handler;
pub mod stream;
pub mod system;

use axum::Router;
use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the complete publisher router with CORS and request tracing.
///
/// The CORS layer mirrors the handler's own origin check so browsers also
/// reject the response client-side when the origin does not match.
#[must_use]
pub fn router(state: AppState) -> Router {
    let cors = match HeaderValue::from_str(&state.config.allowed_origin) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET]),
        Err(_) => CorsLayer::new().allow_methods([Method::GET]),
    };

    Router::new()
        .merge(handler::routes())
        .merge(system::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
