//! Stateful counter plugin.
//!
//! Region layout under [`SequentialCounter::NAMESPACE`]:
//!
//! | field | kind  | content                        |
//! |-------|-------|--------------------------------|
//! | 0     | word  | last issued sequence number    |
//! | 1     | keyed | sequence number → caller       |
//! | 2     | keyed | sequence number → input        |

use graft_core::{BoxError, CallContext, Plugin, StorageTag};
use std::sync::LazyLock;

static TAG: LazyLock<StorageTag> =
    LazyLock::new(|| StorageTag::from_namespace(SequentialCounter::NAMESPACE));

/// Issues `1, 2, 3, …` across calls and records the caller of each.
///
/// Emits `ActionPerformed(caller, sequence)` on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialCounter;

impl SequentialCounter {
    /// Namespace the region tag is derived from.
    pub const NAMESPACE: &'static str = "graft.plugins.sequential-counter";

    /// Field holding the last issued sequence number.
    pub const COUNT_FIELD: u64 = 0;

    /// Keyed field mapping sequence number to caller.
    pub const CALLERS_FIELD: u64 = 1;

    /// Keyed field mapping sequence number to the input it was called with.
    pub const INPUTS_FIELD: u64 = 2;

    /// Event name emitted per call.
    pub const EVENT: &'static str = "ActionPerformed";

    /// The region tag this plugin stores its state under.
    pub fn tag() -> StorageTag {
        *TAG
    }
}

impl Plugin for SequentialCounter {
    async fn perform_action(
        &self,
        ctx: &mut CallContext<'_>,
        input: u64,
    ) -> Result<u64, BoxError> {
        let caller = ctx.caller();
        let mut region = ctx.region(Self::tag());

        let next = region
            .load(Self::COUNT_FIELD)
            .to_u64()
            .and_then(|n| n.checked_add(1))
            .ok_or("sequence counter exhausted")?;

        region.store(Self::COUNT_FIELD, next);
        region.store_entry(Self::CALLERS_FIELD, next, caller);
        region.store_entry(Self::INPUTS_FIELD, next, input);

        ctx.emit(Self::EVENT, vec![caller.into(), next.into()]);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::{Address, Storage};

    #[tokio::test]
    async fn test_issues_increasing_numbers_and_records_callers() {
        let mut storage = Storage::new();
        let alice = Address::from_low_u64(0xa11ce);
        let bob = Address::from_low_u64(0xb0b);

        let mut ctx = CallContext::new(alice, 1, &mut storage);
        assert_eq!(SequentialCounter.perform_action(&mut ctx, 0).await.unwrap(), 1);
        let logs = ctx.into_logs();
        assert_eq!(logs[0].data[0].to_address(), alice);

        let mut ctx = CallContext::new(bob, 1, &mut storage);
        assert_eq!(SequentialCounter.perform_action(&mut ctx, 9).await.unwrap(), 2);
        drop(ctx);

        let tag = SequentialCounter::tag();
        let slot = tag.entry_slot(SequentialCounter::CALLERS_FIELD, 2u64.into());
        assert_eq!(storage.load(&slot).to_address(), bob);
        let slot = tag.entry_slot(SequentialCounter::INPUTS_FIELD, 2u64.into());
        assert_eq!(storage.load(&slot).to_u64(), Some(9));
    }

    #[tokio::test]
    async fn test_region_does_not_depend_on_plugin_id() {
        let mut storage = Storage::new();
        let caller = Address::from_low_u64(1);

        let mut ctx = CallContext::new(caller, 1, &mut storage);
        SequentialCounter.perform_action(&mut ctx, 0).await.unwrap();
        let mut ctx = CallContext::new(caller, 7, &mut storage);
        let out = SequentialCounter.perform_action(&mut ctx, 0).await.unwrap();
        assert_eq!(out, 2);
    }
}
