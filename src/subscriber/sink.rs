//! Event-sink interface between the transport and the presentation layer.
//!
//! The transport task calls exactly three capability methods, mirroring the
//! open/data/error callbacks of a browser `EventSource`. Implementations
//! decide what "render" means: the CLI prints, tests accumulate.

use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::TickEvent;
use crate::error::PulseError;

/// Receiver of subscription lifecycle callbacks.
///
/// Called from the transport's read task, so implementations must be
/// thread-safe.
pub trait EventSink: Send + Sync + std::fmt::Debug + 'static {
    /// The stream opened; events will follow.
    fn on_open(&self);

    /// One event arrived and parsed.
    fn on_data(&self, event: TickEvent);

    /// A transport or parse error occurred. Terminal errors are followed by
    /// no further callbacks; a parse error of a single frame is not
    /// terminal.
    fn on_error(&self, error: &PulseError);
}

/// Append-only in-memory sink: accumulated events plus a connected flag.
///
/// New events are appended to the end of the list (display order is
/// oldest-first). Used by the CLI for rendering and by tests for
/// assertions.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<TickEvent>>,
    connected: AtomicBool,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all events received so far, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TickEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of events received so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no events have been received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the connected flag as last reported by the transport.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

impl EventSink for EventLog {
    fn on_open(&self) {
        self.connected.store(true, Ordering::SeqCst);
    }

    fn on_data(&self, event: TickEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    fn on_error(&self, error: &PulseError) {
        tracing::debug!(%error, "sink observed error");
        if matches!(
            error,
            PulseError::Transport(_) | PulseError::StreamClosed | PulseError::NotAnEventStream(_)
        ) {
            self.connected.store(false, Ordering::SeqCst);
        }
    }
}
