//! Testing utilities for Graft.
//!
//! - [`RecordingSink`]: an event sink that keeps every event it sees
//! - [`FailingPlugin`]: writes to a region, then returns an error
//! - [`PanickingPlugin`]: writes to a region, then panics
//! - [`CallerProbe`]: returns the low bits of the caller it observes

use graft_core::{Address, BoxError, CallContext, Event, EventSink, Plugin, StorageTag, Word};
use std::sync::{Arc, Mutex};
use thiserror::Error;

// ============================================================================
// Recording Sink
// ============================================================================

/// A sink that records all events it receives.
///
/// Clones share the same buffer, so keep one clone for inspection and hand
/// the other to the host.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingSink::new();
/// let host = HostBuilder::new(authority).sink(recorder.clone()).build();
/// // ...
/// assert_eq!(recorder.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the recorded events.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Get the number of recorded events.
    pub fn count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// The most recent event, if any.
    pub fn last(&self) -> Option<Event> {
        self.events.lock().unwrap().last().cloned()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl EventSink for RecordingSink {
    fn on_event(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// ============================================================================
// Faulty Plugins
// ============================================================================

/// Error returned by [`FailingPlugin`].
#[derive(Debug, Error)]
#[error("intentional failure after writing to storage")]
pub struct IntentionalFailure;

/// Scribbles over scalar field 0 of `tag`, emits a log, then fails.
///
/// Point it at another plugin's region to check that failed calls leave
/// that region untouched.
#[derive(Debug, Clone, Copy)]
pub struct FailingPlugin {
    tag: StorageTag,
}

impl FailingPlugin {
    /// Create a plugin that scribbles over `tag`.
    pub const fn new(tag: StorageTag) -> Self {
        Self { tag }
    }
}

impl Plugin for FailingPlugin {
    async fn perform_action(
        &self,
        ctx: &mut CallContext<'_>,
        input: u64,
    ) -> Result<u64, BoxError> {
        ctx.region(self.tag).store(0, Word([0xee; 32]));
        ctx.region(self.tag).store_entry(1, input, Word([0xee; 32]));
        ctx.emit("Scribbled", vec![input.into()]);
        Err(Box::new(IntentionalFailure))
    }
}

/// Like [`FailingPlugin`], but panics instead of returning an error.
#[derive(Debug, Clone, Copy)]
pub struct PanickingPlugin {
    tag: StorageTag,
}

impl PanickingPlugin {
    /// Create a plugin that scribbles over `tag` and then panics.
    pub const fn new(tag: StorageTag) -> Self {
        Self { tag }
    }
}

impl Plugin for PanickingPlugin {
    async fn perform_action(
        &self,
        ctx: &mut CallContext<'_>,
        _input: u64,
    ) -> Result<u64, BoxError> {
        ctx.region(self.tag).store(0, Word([0xee; 32]));
        panic!("plugin fault");
    }
}

/// Returns the low 64 bits of the caller it observes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallerProbe;

impl CallerProbe {
    /// Decode the value returned by [`CallerProbe`] back into an address.
    pub fn decode(result: u64) -> Address {
        Address::from_low_u64(result)
    }
}

impl Plugin for CallerProbe {
    async fn perform_action(
        &self,
        ctx: &mut CallContext<'_>,
        _input: u64,
    ) -> Result<u64, BoxError> {
        Ok(Word::from(ctx.caller()).low_u64())
    }
}
