//! # graft - Extensible Dispatch Host
//!
//! `graft` maps small integer ids to pluggable modules and runs them
//! *inside the host's own context*: an invoked plugin reads and writes the
//! host's shared storage and sees the original caller, never the host.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use graft::prelude::*;
//! use graft::plugins::Multiplier;
//!
//! let operator = Address::from_low_u64(1);
//! let mut host = Host::new(SingleOwner::new(operator));
//!
//! let address = host.deploy(Multiplier::new(10));
//! let id = host.add_plugin(operator, address)?;
//!
//! let caller = Address::from_low_u64(2);
//! assert_eq!(host.execute(caller, id, 5).await?, 50);
//! ```
//!
//! ## Guarantees
//!
//! - ids are issued `1, 2, 3, …` and never reused
//! - an address is bound to at most one id at a time
//! - only the operator can add, update or remove bindings
//! - a failed dispatch leaves storage and the event log untouched
//!
//! ## Trust assumptions
//!
//! - plugin regions are separated only by hash-derived tags; nothing
//!   detects two plugins sharing a namespace
//! - plugins get unrestricted write access to the shared storage
//! - [`Host::read_raw_storage`] lets anyone read any region

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod deployments;
mod host;
pub mod registry;

pub use deployments::Deployments;
pub use host::{Host, HostBuilder};
pub use registry::Registry;

pub use graft_core::{
    // Addressing
    Address,
    // Errors
    BoxError,
    // Plugin contract
    CallContext,
    Checkpoint,
    DynPlugin,
    ErrorKind,
    // Events
    Event,
    EventSink,
    Fault,
    HostError,
    NO_PLUGIN,
    // Authorization
    OwnershipCheck,
    Plugin,
    PluginId,
    PluginLog,
    Region,
    Slot,
    // Storage
    Storage,
    StorageTag,
    Word,
};

pub use graft_std::SingleOwner;

/// Sample plugins.
pub mod plugins {
    pub use graft_std::plugins::{Multiplier, SequentialCounter};
}

/// Standard event sinks.
pub mod sinks {
    pub use graft_std::sinks::LoggingSink;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use graft_std::testing::*;
}

/// Prelude module - common imports for Graft.
///
/// # Usage
///
/// ```rust,ignore
/// use graft::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Address, BoxError, CallContext, Event, EventSink, Host, HostBuilder, HostError, Plugin,
        PluginId, SingleOwner, StorageTag, Word,
    };
}
