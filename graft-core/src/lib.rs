//! # graft-core
//!
//! Core types and traits for the Graft dispatch host.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! plugin authors who don't need the host itself.
//!
//! # Building Blocks
//!
//! - [`Storage`] - the host's shared, journaled word store
//! - [`StorageTag`] / [`Region`] - namespace-derived addressing of a plugin's
//!   private partition inside that store
//! - [`Plugin`] / [`DynPlugin`] - the single-operation contract
//! - [`CallContext`] - what a plugin sees during one delegated call
//! - [`Event`] / [`EventSink`] - observable notifications
//! - [`OwnershipCheck`] - the operator capability the registry consumes
//!
//! # Error Types
//!
//! - [`HostError`] - Top-level error type
//! - [`Fault`] - Plugin execution faults

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod address;
mod authority;
mod error;
mod event;
mod plugin;
mod storage;

// Re-exports
pub use address::{Address, NO_PLUGIN, PluginId};
pub use authority::OwnershipCheck;
pub use error::{BoxError, ErrorKind, Fault, HostError};
pub use event::{Event, EventSink, PluginLog};
pub use plugin::{CallContext, DynPlugin, Plugin};
pub use storage::{Checkpoint, Region, Slot, Storage, StorageTag, Word};
