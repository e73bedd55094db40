//! Logging sink for event observation.

use graft_core::{Event, EventSink};

/// A sink that logs every host event.
///
/// Logs through `tracing` when the `tracing` feature is enabled and is a
/// no-op otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSink {
    name: &'static str,
}

impl LoggingSink {
    /// Create a sink that tags its records with `name`.
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// The tag attached to each record.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl EventSink for LoggingSink {
    fn on_event(&self, event: &Event) {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(sink = %self.name, plugin_id = event.plugin_id(), ?event, "host event");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = event; // Suppress unused warning
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::Address;

    #[test]
    fn test_logging_sink_accepts_every_event() {
        let sink = LoggingSink::new("test");
        assert_eq!(sink.name(), "test");
        sink.on_event(&Event::Added {
            id: 1,
            address: Address::from_low_u64(9),
        });
        sink.on_event(&Event::Removed { id: 1 });
    }
}
