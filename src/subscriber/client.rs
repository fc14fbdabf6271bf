//! Subscriber transport: owns at most one live stream at a time.
//!
//! [`SseClient`] is the consumer-side counterpart of the publisher's
//! `/events` handler. `start` opens the stream and wires the three sink
//! callbacks; `stop` aborts the read task (synchronous close); dropping the
//! client tears the transport down without touching display state.

use std::sync::{Arc, Mutex, PoisonError};

use futures_util::StreamExt;
use reqwest::header;
use tokio::task::JoinHandle;

use super::parser::SseFrameParser;
use super::sink::EventSink;
use super::state::ConnectionState;
use crate::domain::TickEvent;
use crate::error::PulseError;

/// Locks the shared state, recovering from poisoning (callbacks never hold
/// the lock across an await).
fn lock(state: &Mutex<ConnectionState>) -> std::sync::MutexGuard<'_, ConnectionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Consumer side of one subscription.
#[derive(Debug)]
pub struct SseClient {
    endpoint: String,
    http: reqwest::Client,
    sink: Arc<dyn EventSink>,
    state: Arc<Mutex<ConnectionState>>,
    task: Option<JoinHandle<()>>,
}

impl SseClient {
    /// Creates a client for the given endpoint; no transport is opened yet.
    #[must_use]
    pub fn new(endpoint: String, sink: Arc<dyn EventSink>) -> Self {
        Self {
            endpoint,
            http: reqwest::Client::new(),
            sink,
            state: Arc::new(Mutex::new(ConnectionState::Idle)),
            task: None,
        }
    }

    /// Opens a new transport and begins delivering callbacks to the sink.
    ///
    /// Silently ignored when a transport is already live, so a double
    /// start never produces a duplicate stream.
    pub fn start(&mut self) {
        if !lock(&self.state).try_start() {
            tracing::debug!("start ignored: transport already live");
            return;
        }

        let task = tokio::spawn(run_subscription(
            self.http.clone(),
            self.endpoint.clone(),
            Arc::clone(&self.sink),
            Arc::clone(&self.state),
        ));
        self.task = Some(task);
        tracing::info!(endpoint = %self.endpoint, "subscription started");
    }

    /// Closes the transport and clears the handle. No-op when no handle
    /// exists.
    pub fn stop(&mut self) {
        let Some(task) = self.task.take() else {
            tracing::debug!("stop ignored: no transport handle");
            return;
        };
        task.abort();
        lock(&self.state).closed();
        tracing::info!("subscription stopped");
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *lock(&self.state)
    }

    /// Returns `true` while a transport is live.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.state().is_live()
    }
}

impl Drop for SseClient {
    fn drop(&mut self) {
        // Teardown: close the transport; display state belongs to the sink
        // and is left alone.
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// The read task: one open transport from request to terminal close.
async fn run_subscription(
    http: reqwest::Client,
    endpoint: String,
    sink: Arc<dyn EventSink>,
    state: Arc<Mutex<ConnectionState>>,
) {
    let response = http
        .get(&endpoint)
        .header(header::ACCEPT, "text/event-stream")
        .send()
        .await
        .and_then(reqwest::Response::error_for_status);
    let response = match response {
        Ok(response) => response,
        Err(source) => {
            lock(&state).closed();
            sink.on_error(&PulseError::Transport(source));
            return;
        }
    };

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !content_type.starts_with("text/event-stream") {
        lock(&state).closed();
        sink.on_error(&PulseError::NotAnEventStream(content_type));
        return;
    }

    lock(&state).opened();
    sink.on_open();
    tracing::info!(%endpoint, "connected to publisher");

    let mut parser = SseFrameParser::new();
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        match chunk {
            Ok(bytes) => {
                for payload in parser.feed(&bytes) {
                    match serde_json::from_str::<TickEvent>(&payload) {
                        Ok(event) => sink.on_data(event),
                        // A bad frame is not terminal; the transport stays up.
                        Err(source) => sink.on_error(&PulseError::MalformedEvent(source)),
                    }
                }
            }
            Err(source) => {
                lock(&state).closed();
                sink.on_error(&PulseError::Transport(source));
                return;
            }
        }
    }

    lock(&state).closed();
    sink.on_error(&PulseError::StreamClosed);
}
