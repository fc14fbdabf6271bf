//! Domain layer: the event payload, subscription identity, and the
//! publisher's subscription arena.

pub mod event;
pub mod registry;
pub mod subscription_id;

pub use event::TickEvent;
pub use registry::{SubscriptionEntry, SubscriptionRegistry};
pub use subscription_id::SubscriptionId;
