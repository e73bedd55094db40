//! Observable notifications.
//!
//! Events form an append-only log. They are never read back by the engine.

use crate::address::{Address, PluginId};
use crate::storage::Word;
use std::sync::Arc;

/// A notification emitted by a plugin during a call.
///
/// Buffered in the [`CallContext`](crate::CallContext) and only surfaced if
/// the call succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginLog {
    /// Event name chosen by the plugin.
    pub name: &'static str,
    /// Event payload.
    pub data: Vec<Word>,
}

/// A notification emitted by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A new binding was created.
    Added {
        /// The issued id.
        id: PluginId,
        /// The bound address.
        address: Address,
    },
    /// An id was rebound to a new address.
    Updated {
        /// The rebound id.
        id: PluginId,
        /// The new address.
        address: Address,
    },
    /// A binding was removed.
    Removed {
        /// The vacated id.
        id: PluginId,
    },
    /// A plugin call completed.
    Executed {
        /// The dispatched id.
        id: PluginId,
        /// The value the plugin returned.
        result: u64,
    },
    /// A plugin emitted its own notification during a successful call.
    Emitted {
        /// The dispatched id.
        id: PluginId,
        /// The plugin's notification.
        log: PluginLog,
    },
}

impl Event {
    /// The plugin id the event refers to.
    pub fn plugin_id(&self) -> PluginId {
        match self {
            Event::Added { id, .. }
            | Event::Updated { id, .. }
            | Event::Removed { id }
            | Event::Executed { id, .. }
            | Event::Emitted { id, .. } => *id,
        }
    }
}

/// A subscriber to host events.
pub trait EventSink: Send + Sync + 'static {
    /// Called once per event, in emission order.
    fn on_event(&self, event: &Event);
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn on_event(&self, event: &Event) {
        (**self).on_event(event)
    }
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    fn on_event(&self, event: &Event) {
        (**self).on_event(event)
    }
}
