//! Channel configuration.
//!
//! The push channel is deliberately non-configurable at runtime: the port,
//! emission cadence, allowed origin, and subscriber endpoint are fixed
//! values. [`PulseConfig`] keeps them in one typed struct so tests can bind
//! ephemeral ports and shorten the cadence without touching the defaults.

use std::net::SocketAddr;
use std::time::Duration;

/// Fixed TCP port the publisher listens on.
pub const PUBLISHER_PORT: u16 = 5051;

/// The single origin allowed to open subscriptions.
pub const ALLOWED_ORIGIN: &str = "http://localhost:3031";

/// Seconds between successive events on every subscription.
pub const EMIT_PERIOD_SECS: u64 = 3;

/// Top-level configuration for both sides of the channel.
#[derive(Debug, Clone)]
pub struct PulseConfig {
    /// Socket address the publisher binds to.
    pub listen_addr: SocketAddr,

    /// Origin string allowed by the cross-origin check.
    pub allowed_origin: String,

    /// Period between events; first event fires one full period after open.
    pub emit_period: Duration,

    /// Absolute URL the subscriber connects to.
    pub endpoint: String,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], PUBLISHER_PORT)),
            allowed_origin: ALLOWED_ORIGIN.to_string(),
            emit_period: Duration::from_secs(EMIT_PERIOD_SECS),
            endpoint: format!("http://127.0.0.1:{PUBLISHER_PORT}/events"),
        }
    }
}

impl PulseConfig {
    /// Returns the default fixed configuration.
    #[must_use]
    pub fn fixed() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_channel_contract() {
        let config = PulseConfig::fixed();
        assert_eq!(config.listen_addr.port(), 5051);
        assert_eq!(config.emit_period, Duration::from_secs(3));
        assert!(config.endpoint.ends_with("/events"));
    }
}
