//! # Plugin Contract
//!
//! Every plugin exposes exactly one operation, [`Plugin::perform_action`].
//! It is only ever invoked by the host's dispatch engine, inside the host's
//! context:
//!
//! - storage reads and writes land in the host's shared storage
//! - [`CallContext::caller`] is the original external caller, never the host
//!
//! A plugin may be stateless (a pure function of `input`) or keep state in
//! its own region, located through a [`StorageTag`] derived from a namespace
//! constant only the plugin knows.
//!
//! Writing outside one's own region corrupts other plugins' data. That is a
//! programming error; the host does not detect it.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Plugin`] uses native `async fn`. The registry stores plugins as
//! [`DynPlugin`] trait objects, which every `Plugin` implements automatically.

use crate::address::{Address, PluginId};
use crate::error::BoxError;
use crate::event::PluginLog;
use crate::storage::{Region, Storage, StorageTag, Word};
use std::{future::Future, pin::Pin};

/// The execution context handed to a plugin for one call.
///
/// Threads the original caller and a handle to the host's storage through
/// the call instead of relying on any ambient "current caller".
pub struct CallContext<'s> {
    caller: Address,
    plugin_id: PluginId,
    storage: &'s mut Storage,
    logs: Vec<PluginLog>,
}

impl<'s> CallContext<'s> {
    /// Create a context for one call of `plugin_id` on behalf of `caller`.
    pub fn new(caller: Address, plugin_id: PluginId, storage: &'s mut Storage) -> Self {
        Self {
            caller,
            plugin_id,
            storage,
            logs: Vec::new(),
        }
    }

    /// The original external caller.
    pub fn caller(&self) -> Address {
        self.caller
    }

    /// The id this call was dispatched under.
    ///
    /// The same code may be bound under different ids over time; region
    /// layout must not depend on this.
    pub fn plugin_id(&self) -> PluginId {
        self.plugin_id
    }

    /// Mutable view of the region rooted at `tag`.
    pub fn region(&mut self, tag: StorageTag) -> Region<'_> {
        self.storage.region(tag)
    }

    /// Read-only access to the whole shared storage.
    pub fn storage(&self) -> &Storage {
        &*self.storage
    }

    /// Unrestricted mutable access to the whole shared storage.
    pub fn storage_mut(&mut self) -> &mut Storage {
        &mut *self.storage
    }

    /// Emit a notification. Discarded if the call fails.
    pub fn emit(&mut self, name: &'static str, data: Vec<Word>) {
        self.logs.push(PluginLog { name, data });
    }

    /// Notifications emitted so far.
    pub fn logs(&self) -> &[PluginLog] {
        &self.logs
    }

    /// Consume the context, yielding the buffered notifications.
    pub fn into_logs(self) -> Vec<PluginLog> {
        self.logs
    }
}

/// The single-operation contract every plugin implements.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Plugin`",
    label = "missing `Plugin` implementation",
    note = "Plugins must implement `perform_action(ctx, input) -> Result<u64, BoxError>`."
)]
pub trait Plugin: Send + Sync + 'static {
    /// Run the plugin's action against the host's context.
    ///
    /// Returning `Err` (or panicking) rolls back every storage write made
    /// during the call.
    fn perform_action(
        &self,
        ctx: &mut CallContext<'_>,
        input: u64,
    ) -> impl Future<Output = Result<u64, BoxError>> + Send;
}

/// Dynamic object-safe version of [`Plugin`].
pub trait DynPlugin: Send + Sync + 'static {
    /// Run the plugin's action (dynamic dispatch version).
    fn perform_action_dyn<'a, 's>(
        &'a self,
        ctx: &'a mut CallContext<'s>,
        input: u64,
    ) -> Pin<Box<dyn Future<Output = Result<u64, BoxError>> + Send + 'a>>;
}

// Blanket implementation: Any type implementing Plugin implements DynPlugin automatically.
impl<T: Plugin> DynPlugin for T {
    fn perform_action_dyn<'a, 's>(
        &'a self,
        ctx: &'a mut CallContext<'s>,
        input: u64,
    ) -> Pin<Box<dyn Future<Output = Result<u64, BoxError>> + Send + 'a>> {
        Box::pin(self.perform_action(ctx, input))
    }
}
