//! Stateless multiplier plugin.

use graft_core::{BoxError, CallContext, Plugin};
use thiserror::Error;

/// Error returned when the product does not fit in a `u64`.
#[derive(Debug, Error)]
#[error("{input} * {factor} overflows")]
pub struct MultiplyOverflow {
    /// The rejected input.
    pub input: u64,
    /// The configured factor.
    pub factor: u64,
}

/// Returns `input * factor`. Touches no storage.
#[derive(Debug, Clone, Copy)]
pub struct Multiplier {
    factor: u64,
}

impl Multiplier {
    /// Create a multiplier with a constant factor.
    pub const fn new(factor: u64) -> Self {
        Self { factor }
    }

    /// The constant factor.
    pub fn factor(&self) -> u64 {
        self.factor
    }
}

impl Plugin for Multiplier {
    async fn perform_action(
        &self,
        _ctx: &mut CallContext<'_>,
        input: u64,
    ) -> Result<u64, BoxError> {
        input.checked_mul(self.factor).ok_or_else(|| {
            Box::new(MultiplyOverflow {
                input,
                factor: self.factor,
            }) as BoxError
        })
    }
}
