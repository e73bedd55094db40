//! Single-owner operator authority.

use graft_core::{Address, OwnershipCheck};

/// Grants operator rights to exactly one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleOwner {
    owner: Address,
}

impl SingleOwner {
    /// Create an authority owned by `owner`.
    pub const fn new(owner: Address) -> Self {
        Self { owner }
    }

    /// The current owner.
    pub fn owner(&self) -> Address {
        self.owner
    }
}

impl OwnershipCheck for SingleOwner {
    fn is_operator(&self, caller: &Address) -> bool {
        !caller.is_zero() && *caller == self.owner
    }
}
