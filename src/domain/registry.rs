//! Arena of active subscriptions owned by the publisher.
//!
//! [`SubscriptionRegistry`] stores one [`SubscriptionEntry`] per open SSE
//! connection, keyed by [`SubscriptionId`]. Entries are inserted when a
//! subscription opens and removed atomically when its transport closes, so
//! the registry length always equals the number of live streams.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::SubscriptionId;

/// Bookkeeping record for one active subscription.
///
/// The emission timer and the transport are owned by the subscription's
/// stream, not by this record; the entry exists so the publisher can
/// observe and log its connections.
#[derive(Debug, Clone)]
pub struct SubscriptionEntry {
    /// Identifier assigned when the subscription was accepted.
    pub id: SubscriptionId,
    /// When the subscription was opened.
    pub opened_at: DateTime<Utc>,
    /// Number of events emitted on this subscription so far.
    pub events_sent: u64,
}

impl SubscriptionEntry {
    /// Creates a fresh entry for a just-opened subscription.
    #[must_use]
    pub fn new(id: SubscriptionId) -> Self {
        Self {
            id,
            opened_at: Utc::now(),
            events_sent: 0,
        }
    }
}

/// Central store for all active subscriptions.
///
/// Each subscription's timer and transport remain exclusively owned by its
/// stream; nothing here is shared between subscriptions beyond the map
/// itself.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    entries: RwLock<HashMap<SubscriptionId, SubscriptionEntry>>,
}

impl SubscriptionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscription, returning its id.
    pub async fn insert(&self) -> SubscriptionId {
        let id = SubscriptionId::new();
        let mut map = self.entries.write().await;
        map.insert(id, SubscriptionEntry::new(id));
        id
    }

    /// Removes a subscription on transport close.
    ///
    /// Returns the final entry, or `None` if the id was already gone
    /// (double-removal is harmless).
    pub async fn remove(&self, id: SubscriptionId) -> Option<SubscriptionEntry> {
        self.entries.write().await.remove(&id)
    }

    /// Increments the emission counter for a subscription.
    ///
    /// Returns the updated count, or `None` if the subscription no longer
    /// exists.
    pub async fn record_emission(&self, id: SubscriptionId) -> Option<u64> {
        let mut map = self.entries.write().await;
        let entry = map.get_mut(&id)?;
        entry.events_sent += 1;
        Some(entry.events_sent)
    }

    /// Returns a snapshot of a subscription's entry.
    pub async fn get(&self, id: SubscriptionId) -> Option<SubscriptionEntry> {
        self.entries.read().await.get(&id).cloned()
    }

    /// Returns the number of active subscriptions.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` if no subscriptions are active.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
