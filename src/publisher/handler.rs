//! The `/events` subscription endpoint.
//!
//! Accepts any request from the allowed origin, registers a subscription in
//! the arena, and answers with a persistent `text/event-stream` response
//! driven by a per-subscription timer. The cross-origin check runs before
//! any event-stream headers are written.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::sse::Sse;
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use super::stream::tick_stream;
use crate::app_state::AppState;
use crate::error::PulseError;

/// `GET /events` — open a subscription.
///
/// The first event arrives one full period after the response headers; no
/// keep-alive comments are sent between events, so every line on the wire
/// is a `data:` frame.
///
/// # Errors
///
/// Returns [`PulseError::OriginNotAllowed`] when the request carries an
/// `Origin` header that differs from the configured origin.
pub async fn events_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, PulseError> {
    check_origin(&headers, &state.config.allowed_origin)?;

    let id = state.registry.insert().await;
    tracing::info!(subscription = %id, "client connected");

    let stream = tick_stream(Arc::clone(&state.registry), id, state.config.emit_period);
    let mut response = Sse::new(stream).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    Ok(response)
}

/// Rejects requests whose `Origin` header does not match the allowed
/// origin. Requests without an `Origin` header (non-browser clients) pass,
/// matching browser-only CORS semantics.
fn check_origin(headers: &HeaderMap, allowed: &str) -> Result<(), PulseError> {
    match headers.get(header::ORIGIN) {
        None => Ok(()),
        Some(origin) => {
            let origin = origin.to_str().unwrap_or_default();
            if origin == allowed {
                Ok(())
            } else {
                tracing::warn!(origin, "rejected cross-origin subscription");
                Err(PulseError::OriginNotAllowed(origin.to_string()))
            }
        }
    }
}

/// Publisher routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/events", get(events_handler))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::net::SocketAddr;
    use std::time::Duration;

    use futures_util::StreamExt;

    use crate::app_state::AppState;
    use crate::config::PulseConfig;
    use crate::domain::TickEvent;
    use crate::publisher;
    use crate::subscriber::parser::SseFrameParser;

    /// Binds the full router to an ephemeral port with a short cadence.
    async fn spawn_server(period: Duration) -> (SocketAddr, AppState) {
        let config = PulseConfig {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            emit_period: period,
            ..PulseConfig::fixed()
        };
        let state = AppState::new(config);
        let app = publisher::router(state.clone());

        let listener = tokio::net::TcpListener::bind(state.config.listen_addr).await;
        let Ok(listener) = listener else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (addr, state)
    }

    async fn get(addr: SocketAddr, origin: Option<&str>) -> reqwest::Response {
        let client = reqwest::Client::new();
        let mut request = client.get(format!("http://{addr}/events"));
        if let Some(origin) = origin {
            request = request.header("Origin", origin);
        }
        let Ok(response) = request.send().await else {
            panic!("request failed");
        };
        response
    }

    #[tokio::test]
    async fn stream_delivers_parseable_events_in_order() {
        let (addr, state) = spawn_server(Duration::from_millis(50)).await;
        let response = get(addr, None).await;
        assert!(
            response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.starts_with("text/event-stream"))
        );
        assert_eq!(state.registry.len().await, 1);

        let mut parser = SseFrameParser::new();
        let mut body = response.bytes_stream();
        let mut events: Vec<TickEvent> = Vec::new();
        while events.len() < 3 {
            let Some(Ok(chunk)) = body.next().await else {
                panic!("stream ended early");
            };
            for payload in parser.feed(&chunk) {
                let Ok(event) = serde_json::from_str::<TickEvent>(&payload) else {
                    panic!("unparseable payload: {payload}");
                };
                events.push(event);
            }
        }
        assert_eq!(events.len(), 3);
        for event in &events {
            assert!(event.time.ends_with('M'), "not a time string: {}", event.time);
        }
    }

    #[tokio::test]
    async fn matching_origin_is_accepted() {
        let (addr, state) = spawn_server(Duration::from_millis(50)).await;
        let allowed = state.config.allowed_origin.clone();
        let response = get(addr, Some(&allowed)).await;
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn foreign_origin_is_rejected_before_stream_headers() {
        let (addr, state) = spawn_server(Duration::from_millis(50)).await;
        let response = get(addr, Some("https://evil.example")).await;

        assert_eq!(response.status(), 403);
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(!content_type.starts_with("text/event-stream"));
        assert!(state.registry.is_empty().await);

        let Ok(body) = response.text().await else {
            panic!("no body");
        };
        assert!(body.contains("1001"));
    }

    #[tokio::test]
    async fn client_disconnect_cancels_timer_and_frees_entry() {
        let (addr, state) = spawn_server(Duration::from_millis(50)).await;
        let response = get(addr, None).await;
        assert_eq!(state.registry.len().await, 1);

        drop(response);

        // The publisher notices the closed transport on its next write.
        for _ in 0..100 {
            if state.registry.is_empty().await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("subscription was not torn down after disconnect");
    }
}
