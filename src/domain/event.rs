//! The event payload pushed to subscribers.
//!
//! A [`TickEvent`] carries a single human-readable timestamp string,
//! generated publisher-side at emission time. Events are immutable once
//! created and carry no identifier; ordering is arrival order on the wire.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// One timestamped event as it appears on the wire: `{"time": "2:55:02 PM"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEvent {
    /// Locale-style 12-hour time string, e.g. `"2:55:02 PM"`.
    pub time: String,
}

impl TickEvent {
    /// Creates an event stamped with the current local time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            time: Local::now().format("%-I:%M:%S %p").to_string(),
        }
    }

    /// Serializes the event to its JSON wire form.
    ///
    /// Infallible in practice (the struct is a single string field), so a
    /// serialization failure degrades to an empty object rather than
    /// propagating an error into the emission path.
    #[must_use]
    pub fn to_wire(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn now_produces_twelve_hour_time() {
        let event = TickEvent::now();
        assert!(
            event.time.ends_with("AM") || event.time.ends_with("PM"),
            "unexpected time format: {}",
            event.time
        );
        // h:mm:ss plus meridiem: two colon separators.
        assert_eq!(event.time.matches(':').count(), 2);
    }

    #[test]
    fn wire_form_is_time_keyed_json() {
        let event = TickEvent {
            time: "2:55:02 PM".to_string(),
        };
        assert_eq!(event.to_wire(), r#"{"time":"2:55:02 PM"}"#);
    }

    #[test]
    fn wire_form_round_trips() {
        let event = TickEvent::now();
        let parsed: Option<TickEvent> = serde_json::from_str(&event.to_wire()).ok();
        let Some(parsed) = parsed else {
            panic!("wire form did not parse back");
        };
        assert_eq!(parsed, event);
    }
}
