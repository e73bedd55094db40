//! # graft-std
//!
//! Standard implementations for the Graft dispatch host.
//!
//! This crate provides:
//! - **Authorities**: [`SingleOwner`]
//! - **Event sinks**: [`sinks::LoggingSink`]
//! - **Sample plugins**: [`plugins::Multiplier`], [`plugins::SequentialCounter`]
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use graft_core;

// Modules
pub mod authority;
pub mod plugins;
pub mod sinks;
pub mod testing;

pub use authority::SingleOwner;
