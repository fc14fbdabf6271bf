//! # pulse-gateway
//!
//! A minimal Server-Sent-Events push channel. The **publisher** streams one
//! timestamped event every three seconds over a long-lived `/events`
//! response; the **subscriber** opens and closes that stream interactively
//! and accumulates received events.
//!
//! Data flows one way, publisher to subscriber; after the initial request
//! the client sends nothing. There is no reconnection policy, no
//! authentication, no backpressure, and no persistence — any failure
//! degrades to "disconnected" and resuming takes an explicit new start.
//!
//! ## Architecture
//!
//! ```text
//! pulse-gateway (bin)                    pulse-subscriber (bin)
//!     │                                      │
//!     ├── /events handler (publisher/)       ├── SseClient (subscriber/)
//!     ├── tick stream + drop guard           ├── SseFrameParser
//!     ├── SubscriptionRegistry (domain/)     ├── EventSink / EventLog
//!     │                                      └── ConnectionState
//!     └── TickEvent (domain/) ── SSE wire ───┘
//! ```

pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod publisher;
pub mod subscriber;
