//! Standard event sinks.

pub mod logging;

pub use logging::LoggingSink;
