//! Registry of id ↔ address bindings.
//!
//! The registry only validates and records bindings. Authorization and
//! event emission are the host's job; see [`Host`](crate::Host).
//!
//! # Invariants
//!
//! - ids are issued `1, 2, 3, …` and never reused, even after removal
//! - `forward[id] = addr` ⇔ `inverse[addr] = id` for every live binding
//! - an address is bound to at most one id

use graft_core::{Address, HostError, NO_PLUGIN, PluginId};
use std::collections::BTreeMap;

/// Forward and inverse binding tables plus the id counter.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    counter: PluginId,
    forward: BTreeMap<PluginId, Address>,
    inverse: BTreeMap<Address, PluginId>,
}

impl Registry {
    /// Create an empty registry. The first issued id will be 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `address` to a fresh id.
    pub fn add(&mut self, address: Address) -> Result<PluginId, HostError> {
        if address.is_zero() {
            return Err(HostError::CannotBeZeroAddress);
        }
        self.ensure_unbound(address)?;

        self.counter += 1;
        let id = self.counter;
        self.forward.insert(id, address);
        self.inverse.insert(address, id);
        Ok(id)
    }

    /// Rebind an issued id to `new_address`.
    ///
    /// The id does not have to be live: a vacated slot can be rebound.
    /// Returns the address previously bound, if any.
    pub fn update(
        &mut self,
        id: PluginId,
        new_address: Address,
    ) -> Result<Option<Address>, HostError> {
        if id == NO_PLUGIN || id > self.counter {
            return Err(HostError::InvalidId { id });
        }
        if new_address.is_zero() {
            return Err(HostError::CannotBeZeroAddress);
        }
        self.ensure_unbound(new_address)?;

        let previous = self.forward.insert(id, new_address);
        if let Some(old) = previous {
            self.inverse.remove(&old);
        }
        self.inverse.insert(new_address, id);
        Ok(previous)
    }

    /// Remove the binding for `id`, returning the address it held.
    pub fn remove(&mut self, id: PluginId) -> Result<Address, HostError> {
        let address = self
            .forward
            .remove(&id)
            .ok_or(HostError::InvalidPlugin { id })?;
        self.inverse.remove(&address);
        Ok(address)
    }

    /// Address bound to `id`, or [`Address::ZERO`].
    pub fn lookup(&self, id: PluginId) -> Address {
        self.forward.get(&id).copied().unwrap_or(Address::ZERO)
    }

    /// Id bound to `address`, or [`NO_PLUGIN`].
    pub fn reverse_lookup(&self, address: &Address) -> PluginId {
        self.inverse.get(address).copied().unwrap_or(NO_PLUGIN)
    }

    /// The last issued id (0 if none).
    pub fn counter(&self) -> PluginId {
        self.counter
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns `true` if no binding is live.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Live bindings in id order.
    pub fn bindings(&self) -> impl Iterator<Item = (PluginId, Address)> + '_ {
        self.forward.iter().map(|(id, address)| (*id, *address))
    }

    fn ensure_unbound(&self, address: Address) -> Result<(), HostError> {
        match self.inverse.get(&address) {
            Some(&id) => Err(HostError::PluginExists { address, id }),
            None => Ok(()),
        }
    }
}
