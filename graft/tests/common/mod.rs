#![allow(dead_code)]

use graft::{Address, Host, SingleOwner, testing::RecordingSink};

// ============================================================================
// Identities
// ============================================================================

pub const OPERATOR: Address = Address::from_low_u64(0x0e);
pub const ALICE: Address = Address::from_low_u64(0xa11ce);
pub const BOB: Address = Address::from_low_u64(0xb0b);

// ============================================================================
// Hosts
// ============================================================================

/// A host owned by [`OPERATOR`] with a recorder attached.
pub fn recorded_host() -> (Host, RecordingSink) {
    let recorder = RecordingSink::new();
    let host = Host::builder(SingleOwner::new(OPERATOR))
        .sink(recorder.clone())
        .build();
    (host, recorder)
}

/// Asserts `forward[id] = addr ⇔ inverse[addr] = id` over every issued id.
pub fn assert_bijection(host: &Host) {
    for id in 1..=host.plugin_count() {
        let address = host.lookup(id);
        if !address.is_zero() {
            assert_eq!(host.reverse_lookup(&address), id, "inverse of id {id}");
        }
    }
    for (id, address) in host.bindings() {
        assert_eq!(host.lookup(id), address);
    }
}
