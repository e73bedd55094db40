//! # Dispatch Engine
//!
//! Runs a registered plugin inside the host's context.
//!
//! Each call is transactional:
//!
//! 1. open a storage checkpoint
//! 2. run the plugin against the host's storage with the original caller
//! 3. on success, commit and surface the plugin's logs plus `Executed`
//! 4. on error or panic, revert every write and drop the plugin's logs
//!
//! The [`CallContext`] handed to the plugin carries no handle back to the
//! host, and the host stays exclusively borrowed for the whole call, so a
//! plugin cannot re-enter the engine.

use super::Host;
use futures::FutureExt;
use graft_core::{Address, CallContext, Event, Fault, HostError, PluginId};
use std::any::Any;
use std::panic::AssertUnwindSafe;

impl Host {
    /// Execute plugin `id` with `input` on behalf of `caller`.
    ///
    /// Anyone may dispatch. Fails with [`HostError::InvalidPlugin`] if `id`
    /// is not bound, and with [`HostError::PluginExecutionFailed`] if the
    /// plugin errors, panics, or has no deployed code. A failed call leaves
    /// storage and the event log exactly as they were.
    pub async fn execute(
        &mut self,
        caller: Address,
        id: PluginId,
        input: u64,
    ) -> Result<u64, HostError> {
        let address = self.registry.lookup(id);
        if address.is_zero() {
            return Err(HostError::InvalidPlugin { id });
        }
        let Some(plugin) = self.deployments.resolve(&address) else {
            return Err(self.fail(id, Fault::NoCode(address)));
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(id, %address, %caller, input, "dispatching plugin");

        let checkpoint = self.storage.checkpoint();
        let mut ctx = CallContext::new(caller, id, &mut self.storage);
        // Building the future runs plugin code too, so it belongs inside the guard.
        let outcome =
            AssertUnwindSafe(async { plugin.perform_action_dyn(&mut ctx, input).await })
                .catch_unwind()
                .await;
        let logs = ctx.into_logs();

        match outcome {
            Ok(Ok(result)) => {
                self.storage.commit(checkpoint);
                for log in logs {
                    self.emit(Event::Emitted { id, log });
                }
                self.emit(Event::Executed { id, result });
                #[cfg(feature = "tracing")]
                tracing::debug!(id, result, "plugin executed");
                Ok(result)
            }
            Ok(Err(err)) => {
                self.storage.revert(checkpoint);
                Err(self.fail(id, Fault::Reverted(err)))
            }
            Err(payload) => {
                self.storage.revert(checkpoint);
                Err(self.fail(id, Fault::Panicked(panic_message(payload))))
            }
        }
    }

    fn fail(&self, id: PluginId, fault: Fault) -> HostError {
        #[cfg(feature = "tracing")]
        tracing::warn!(id, %fault, "plugin execution failed");
        HostError::PluginExecutionFailed { id, fault }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
