//! Subscriber side: connection state machine, event-sink interface, wire
//! parser, and the transport-owning client.

pub mod client;
pub mod parser;
pub mod sink;
pub mod state;

pub use client::SseClient;
pub use parser::SseFrameParser;
pub use sink::{EventLog, EventSink};
pub use state::ConnectionState;
