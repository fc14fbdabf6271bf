//! Per-subscription emission stream.
//!
//! Each accepted subscription gets its own [`tick_stream`]: an interval
//! timer that yields one SSE frame per period. The timer and the transport
//! are owned by the stream, so cancellation is structural — when the client
//! disconnects, Axum drops the stream, the timer dies with it, and the
//! [`SubscriptionGuard`] deregisters the arena entry. No write can happen
//! after close.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::response::sse::Event;
use futures_util::Stream;
use futures_util::stream;
use tokio::time::Instant;

use crate::domain::{SubscriptionId, SubscriptionRegistry, TickEvent};

/// Removes the subscription's arena entry when the stream is dropped.
///
/// Dropping happens inside the connection task, so the async removal is
/// spawned onto the running runtime. If no runtime is left (process
/// shutdown), the entry dies with the process anyway.
#[derive(Debug)]
pub struct SubscriptionGuard {
    registry: Arc<SubscriptionRegistry>,
    id: SubscriptionId,
}

impl SubscriptionGuard {
    /// Creates a guard for the given subscription.
    #[must_use]
    pub fn new(registry: Arc<SubscriptionRegistry>, id: SubscriptionId) -> Self {
        Self { registry, id }
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        let registry = Arc::clone(&self.registry);
        let id = self.id;
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                if let Some(entry) = registry.remove(id).await {
                    tracing::info!(
                        subscription = %id,
                        events_sent = entry.events_sent,
                        "client disconnected"
                    );
                }
            });
        }
    }
}

/// Builds the emission stream for one subscription.
///
/// The first event fires one full `period` after open — there is no
/// immediate event on connect. Each item is a `data:` frame carrying the
/// JSON wire form of a fresh [`TickEvent`]. The stream ends on its own only
/// if the subscription's entry has vanished from the arena.
pub fn tick_stream(
    registry: Arc<SubscriptionRegistry>,
    id: SubscriptionId,
    period: Duration,
) -> impl Stream<Item = Result<Event, Infallible>> {
    let guard = SubscriptionGuard::new(Arc::clone(&registry), id);
    let interval = tokio::time::interval_at(Instant::now() + period, period);

    stream::unfold(
        (interval, registry, guard),
        move |(mut interval, registry, guard)| async move {
            interval.tick().await;
            let event = TickEvent::now();
            let Some(count) = registry.record_emission(id).await else {
                return None;
            };
            tracing::debug!(subscription = %id, count, time = %event.time, "emit");
            Some((
                Ok(Event::default().data(event.to_wire())),
                (interval, registry, guard),
            ))
        },
    )
}
