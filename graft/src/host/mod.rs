//! The dispatch host.
//!
//! [`Host`] is the single owned state object: registry, deployed code,
//! shared storage and event log. There is no global instance; callers hold
//! a `Host` (or a reference to one) and pass the caller identity explicitly
//! into every operation.
//!
//! Operations that mutate take `&mut self`, so calls are serialized by the
//! borrow checker and no two dispatches ever interleave.

mod builder;
mod dispatch;

pub use builder::HostBuilder;

use crate::{deployments::Deployments, registry::Registry};
use graft_core::{
    Address, Event, EventSink, HostError, OwnershipCheck, Plugin, PluginId, Storage, StorageTag,
    Word,
};

/// Registry plus dispatch engine over one shared storage space.
pub struct Host {
    authority: Box<dyn OwnershipCheck>,
    registry: Registry,
    deployments: Deployments,
    storage: Storage,
    events: Vec<Event>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl Host {
    /// Create a host with no sinks. Shorthand for `HostBuilder::new(authority).build()`.
    pub fn new(authority: impl OwnershipCheck) -> Self {
        HostBuilder::new(authority).build()
    }

    /// Start building a host.
    pub fn builder(authority: impl OwnershipCheck) -> HostBuilder {
        HostBuilder::new(authority)
    }

    // ========================================================================
    // Registry operations (operator only)
    // ========================================================================

    /// Bind `address` to a fresh id and emit [`Event::Added`].
    pub fn add_plugin(&mut self, caller: Address, address: Address) -> Result<PluginId, HostError> {
        self.authorize(caller)?;
        let id = self.registry.add(address)?;
        #[cfg(feature = "tracing")]
        tracing::info!(id, %address, "plugin added");
        self.emit(Event::Added { id, address });
        Ok(id)
    }

    /// Rebind `id` to `new_address` and emit [`Event::Updated`].
    pub fn update_plugin(
        &mut self,
        caller: Address,
        id: PluginId,
        new_address: Address,
    ) -> Result<(), HostError> {
        self.authorize(caller)?;
        let previous = self.registry.update(id, new_address)?;
        #[cfg(feature = "tracing")]
        {
            tracing::info!(id, ?previous, %new_address, "plugin updated");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = previous;
        }
        self.emit(Event::Updated {
            id,
            address: new_address,
        });
        Ok(())
    }

    /// Remove the binding for `id` and emit [`Event::Removed`].
    ///
    /// The plugin's storage region is left untouched.
    pub fn remove_plugin(&mut self, caller: Address, id: PluginId) -> Result<(), HostError> {
        self.authorize(caller)?;
        let address = self.registry.remove(id)?;
        #[cfg(feature = "tracing")]
        {
            tracing::info!(id, %address, "plugin removed");
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = address;
        }
        self.emit(Event::Removed { id });
        Ok(())
    }

    // ========================================================================
    // Reads (anyone)
    // ========================================================================

    /// Address bound to `id`, or [`Address::ZERO`].
    pub fn lookup(&self, id: PluginId) -> Address {
        self.registry.lookup(id)
    }

    /// Id bound to `address`, or `0`.
    pub fn reverse_lookup(&self, address: &Address) -> PluginId {
        self.registry.reverse_lookup(address)
    }

    /// The last issued id.
    pub fn plugin_count(&self) -> PluginId {
        self.registry.counter()
    }

    /// Live bindings in id order.
    pub fn bindings(&self) -> impl Iterator<Item = (PluginId, Address)> + '_ {
        self.registry.bindings()
    }

    /// Read the raw word at `tag + offset`.
    ///
    /// Diagnostic peek with no access control: any caller can read any
    /// plugin's region through it.
    pub fn read_raw_storage(&self, tag: StorageTag, offset: u64) -> Word {
        self.storage.load(&tag.slot(offset))
    }

    /// The shared storage space.
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Every event emitted so far, oldest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The operator authority.
    pub fn authority(&self) -> &dyn OwnershipCheck {
        &*self.authority
    }

    // ========================================================================
    // Deployment
    // ========================================================================

    /// Deploy plugin code and return its address. Does not register it.
    pub fn deploy<P: Plugin>(&mut self, plugin: P) -> Address {
        let address = self.deployments.deploy(plugin);
        #[cfg(feature = "tracing")]
        tracing::debug!(%address, "plugin code deployed");
        address
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn authorize(&self, caller: Address) -> Result<(), HostError> {
        if self.authority.is_operator(&caller) {
            Ok(())
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!(%caller, "unauthorized registry mutation");
            Err(HostError::Unauthorized { caller })
        }
    }

    fn emit(&mut self, event: Event) {
        for sink in &self.sinks {
            sink.on_event(&event);
        }
        self.events.push(event);
    }
}
