//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::PulseConfig;
use crate::domain::SubscriptionRegistry;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Arena of active subscriptions.
    pub registry: Arc<SubscriptionRegistry>,
    /// Fixed channel configuration.
    pub config: Arc<PulseConfig>,
}

impl AppState {
    /// Builds state from a configuration, with an empty registry.
    #[must_use]
    pub fn new(config: PulseConfig) -> Self {
        Self {
            registry: Arc::new(SubscriptionRegistry::new()),
            config: Arc::new(config),
        }
    }
}
