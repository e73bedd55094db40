//! Builder for [`Host`].

use super::Host;
use crate::{deployments::Deployments, registry::Registry};
use graft_core::{EventSink, OwnershipCheck, Storage};

/// Builder for constructing a [`Host`].
///
/// The authority is mandatory; sinks are optional and receive events in
/// registration order.
///
/// # Example
/// ```ignore
/// let host = HostBuilder::new(SingleOwner::new(operator))
///     .sink(LoggingSink::new("host"))
///     .build();
/// ```
pub struct HostBuilder {
    authority: Box<dyn OwnershipCheck>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl HostBuilder {
    /// Create a builder with the given operator authority.
    pub fn new(authority: impl OwnershipCheck) -> Self {
        Self {
            authority: Box::new(authority),
            sinks: Vec::new(),
        }
    }

    /// Add an event sink.
    pub fn sink<S: EventSink>(mut self, sink: S) -> Self {
        self.sink_mut(sink);
        self
    }

    /// Add an event sink (mutable version).
    pub fn sink_mut<S: EventSink>(&mut self, sink: S) {
        self.sinks.push(Box::new(sink));
    }

    /// Build the host with an empty registry, empty storage and an empty
    /// event log.
    pub fn build(self) -> Host {
        Host {
            authority: self.authority,
            registry: Registry::new(),
            deployments: Deployments::new(),
            storage: Storage::new(),
            events: Vec::new(),
            sinks: self.sinks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::{Address, Event};
    use graft_std::SingleOwner;
    use graft_std::sinks::LoggingSink;
    use graft_std::testing::RecordingSink;

    #[test]
    fn test_builder_wires_sinks() {
        let operator = Address::from_low_u64(1);
        let recorder = RecordingSink::new();
        let builder = HostBuilder::new(SingleOwner::new(operator))
            .sink(LoggingSink::new("test"))
            .sink(recorder.clone());

        let mut host = builder.build();
        assert_eq!(host.plugin_count(), 0);
        assert!(host.events().is_empty());

        let address = Address::from_low_u64(0x10);
        let id = host.add_plugin(operator, address).unwrap();
        assert_eq!(recorder.events(), vec![Event::Added { id, address }]);
    }

    #[test]
    fn test_closure_authority() {
        let operator = Address::from_low_u64(5);
        let mut host = Host::builder(move |caller: &Address| *caller == operator).build();
        assert!(host.add_plugin(operator, Address::from_low_u64(6)).is_ok());
        assert!(host.authority().is_operator(&operator));
    }
}
