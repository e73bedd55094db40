//! Error types for Graft.
//!
//! - [`HostError`] - Every failure a host operation can surface
//! - [`Fault`] - Why a plugin call terminated abnormally
//! - [`ErrorKind`] - Coarse classification for callers deciding what to do next

use crate::address::{Address, PluginId};
use thiserror::Error;

/// A boxed error type for plugin-level failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by host operations.
///
/// Every error aborts the whole call: no registry or storage mutation made
/// during a failed call is retained.
#[derive(Error, Debug)]
pub enum HostError {
    /// The caller is not the operator.
    #[error("caller {caller} is not authorized to modify the registry")]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
    },

    /// The null handle was supplied where a plugin address is required.
    #[error("plugin address cannot be the zero address")]
    CannotBeZeroAddress,

    /// The address is already bound to a live id.
    #[error("plugin {address} is already registered under id {id}")]
    PluginExists {
        /// The conflicting address.
        address: Address,
        /// The id it is currently bound to.
        id: PluginId,
    },

    /// The id was never issued.
    #[error("invalid plugin id {id}")]
    InvalidId {
        /// The offending id.
        id: PluginId,
    },

    /// No plugin is currently bound to the id.
    #[error("no plugin bound to id {id}")]
    InvalidPlugin {
        /// The offending id.
        id: PluginId,
    },

    /// The plugin itself failed; all of its effects were rolled back.
    #[error("plugin {id} execution failed: {fault}")]
    PluginExecutionFailed {
        /// The dispatched id.
        id: PluginId,
        /// What went wrong inside the plugin.
        #[source]
        fault: Fault,
    },
}

/// Why a plugin call terminated abnormally.
#[derive(Error, Debug)]
pub enum Fault {
    /// The plugin returned an error.
    #[error("plugin reverted: {0}")]
    Reverted(#[source] BoxError),

    /// The plugin panicked.
    #[error("plugin panicked: {0}")]
    Panicked(String),

    /// The bound address has no deployed code.
    #[error("no code deployed at {0}")]
    NoCode(Address),
}

/// Classification of [`HostError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller lacks operator capability. Never retried.
    Authorization,
    /// The request was malformed or conflicts with current state.
    Validation,
    /// The invoked plugin failed.
    Execution,
}

impl HostError {
    /// Coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HostError::Unauthorized { .. } => ErrorKind::Authorization,
            HostError::CannotBeZeroAddress
            | HostError::PluginExists { .. }
            | HostError::InvalidId { .. }
            | HostError::InvalidPlugin { .. } => ErrorKind::Validation,
            HostError::PluginExecutionFailed { .. } => ErrorKind::Execution,
        }
    }
}

impl From<BoxError> for Fault {
    fn from(err: BoxError) -> Self {
        Fault::Reverted(err)
    }
}
