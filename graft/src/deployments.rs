//! Deployed plugin code, keyed by address.
//!
//! Stands in for whatever external mechanism places code at an address.
//! The registry only ever stores addresses; the dispatch engine resolves
//! them here at call time.

use graft_core::{Address, DynPlugin, Plugin};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;

const ADDRESS_DOMAIN: &[u8] = b"graft.deployment";

/// Code table mapping addresses to plugin implementations.
#[derive(Default)]
pub struct Deployments {
    code: HashMap<Address, Arc<dyn DynPlugin>>,
    nonce: u64,
}

impl Deployments {
    /// Create an empty code table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy a plugin at a fresh, non-zero address.
    pub fn deploy<P: Plugin>(&mut self, plugin: P) -> Address {
        self.deploy_dyn(Arc::new(plugin))
    }

    /// Deploy an already type-erased plugin.
    pub fn deploy_dyn(&mut self, plugin: Arc<dyn DynPlugin>) -> Address {
        let address = loop {
            let candidate = derive_address(self.nonce);
            self.nonce += 1;
            if !candidate.is_zero() && !self.code.contains_key(&candidate) {
                break candidate;
            }
        };
        self.code.insert(address, plugin);
        address
    }

    /// Code deployed at `address`, if any.
    pub fn resolve(&self, address: &Address) -> Option<Arc<dyn DynPlugin>> {
        self.code.get(address).cloned()
    }

    /// Returns `true` if code is deployed at `address`.
    pub fn contains(&self, address: &Address) -> bool {
        self.code.contains_key(address)
    }

    /// Number of deployed plugins.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// Returns `true` if nothing is deployed.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

fn derive_address(nonce: u64) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(ADDRESS_DOMAIN);
    hasher.update(nonce.to_be_bytes());
    let digest: [u8; 32] = hasher.finalize().into();
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[12..]);
    Address(bytes)
}
