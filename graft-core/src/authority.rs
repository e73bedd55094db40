//! Operator authorization.

use crate::address::Address;

/// Decides whether a caller may mutate the registry.
///
/// The host consumes this capability; it does not define who the operator is.
pub trait OwnershipCheck: Send + Sync + 'static {
    /// Returns `true` if `caller` holds operator rights.
    fn is_operator(&self, caller: &Address) -> bool;
}

impl<F> OwnershipCheck for F
where
    F: Fn(&Address) -> bool + Send + Sync + 'static,
{
    fn is_operator(&self, caller: &Address) -> bool {
        self(caller)
    }
}
