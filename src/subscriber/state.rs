//! Subscriber connection state machine.
//!
//! Replaces the ad hoc boolean + nullable-handle pattern with an explicit
//! enum and guarded transitions: `Idle → Connecting → Connected → Closed`,
//! where `Closed` may re-enter `Connecting` on a fresh start.

/// Lifecycle state of the subscriber's single transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No transport has ever been opened.
    #[default]
    Idle,
    /// A transport is being established; no events have arrived yet.
    Connecting,
    /// The stream is open and events are flowing.
    Connected,
    /// The transport ended (user stop, publisher close, or error).
    Closed,
}

impl ConnectionState {
    /// Returns `true` while a transport is live (connecting or connected).
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Connecting | Self::Connected)
    }

    /// Attempts the `start` transition. Succeeds only from `Idle` or
    /// `Closed`; starting while live is a no-op and returns `false`.
    pub fn try_start(&mut self) -> bool {
        if self.is_live() {
            return false;
        }
        *self = Self::Connecting;
        true
    }

    /// Marks the transport open. Only meaningful from `Connecting`; a late
    /// open signal after close is ignored.
    pub fn opened(&mut self) {
        if *self == Self::Connecting {
            *self = Self::Connected;
        }
    }

    /// Marks the transport closed, from any state.
    pub fn closed(&mut self) {
        *self = Self::Closed;
    }
}
