//! Sample plugins.
//!
//! - [`Multiplier`] - stateless, multiplies its input by a constant
//! - [`SequentialCounter`] - stateful, hands out increasing ids and records
//!   who asked for each one

pub mod counter;
pub mod multiplier;

pub use counter::SequentialCounter;
pub use multiplier::Multiplier;
