use graft::{
    BoxError, CallContext, Event, Fault, HostError, Plugin, StorageTag, Word,
    plugins::{Multiplier, SequentialCounter},
    testing::{FailingPlugin, PanickingPlugin},
};

mod common;
use common::{ALICE, BOB, OPERATOR, recorded_host};

fn snapshot(host: &graft::Host) -> Vec<(graft::Slot, Word)> {
    host.storage().iter().map(|(s, w)| (*s, *w)).collect()
}

#[tokio::test]
async fn test_failed_call_retains_no_region_mutation() {
    let (mut host, recorder) = recorded_host();
    let counter = host.deploy(SequentialCounter);
    let counter_id = host.add_plugin(OPERATOR, counter).unwrap();
    host.execute(ALICE, counter_id, 0).await.unwrap();

    let failing = host.deploy(FailingPlugin::new(SequentialCounter::tag()));
    let failing_id = host.add_plugin(OPERATOR, failing).unwrap();

    let before = snapshot(&host);
    let events_before = recorder.count();
    let count_before = host.read_raw_storage(SequentialCounter::tag(), 0);

    let err = host.execute(BOB, failing_id, 1).await.unwrap_err();
    assert!(matches!(
        err,
        HostError::PluginExecutionFailed { id, fault: Fault::Reverted(_) } if id == failing_id
    ));

    assert_eq!(snapshot(&host), before);
    assert_eq!(host.read_raw_storage(SequentialCounter::tag(), 0), count_before);
    assert_eq!(recorder.count(), events_before);
    assert!(
        !recorder
            .events()
            .iter()
            .any(|event| matches!(event, Event::Emitted { id, .. } if *id == failing_id))
    );

    // Subsequent calls see the last committed state.
    assert_eq!(host.execute(BOB, counter_id, 0).await.unwrap(), 2);
}

#[tokio::test]
async fn test_panicking_call_is_rolled_back() {
    let (mut host, _) = recorded_host();
    let counter = host.deploy(SequentialCounter);
    let counter_id = host.add_plugin(OPERATOR, counter).unwrap();
    host.execute(ALICE, counter_id, 0).await.unwrap();
    let before = snapshot(&host);

    let panicking = host.deploy(PanickingPlugin::new(SequentialCounter::tag()));
    let id = host.add_plugin(OPERATOR, panicking).unwrap();
    let err = host.execute(ALICE, id, 0).await.unwrap_err();

    assert!(matches!(
        err,
        HostError::PluginExecutionFailed { fault: Fault::Panicked(_), .. }
    ));
    assert_eq!(snapshot(&host), before);
}

/// Writes to its region and panics while building its future, before any
/// future is returned.
struct EagerPanic;

impl EagerPanic {
    fn tag() -> StorageTag {
        StorageTag::from_namespace("graft.tests.eager-panic")
    }
}

impl Plugin for EagerPanic {
    fn perform_action(
        &self,
        ctx: &mut CallContext<'_>,
        input: u64,
    ) -> impl Future<Output = Result<u64, BoxError>> + Send {
        ctx.region(Self::tag()).store(0, 99u64);
        if input > 0 {
            panic!("eager plugin fault");
        }
        std::future::ready(Ok(input))
    }
}

#[tokio::test]
async fn test_panic_before_future_is_returned_is_rolled_back() {
    let (mut host, recorder) = recorded_host();
    let address = host.deploy(EagerPanic);
    let id = host.add_plugin(OPERATOR, address).unwrap();
    let before = snapshot(&host);
    let events_before = recorder.count();

    let err = host.execute(ALICE, id, 1).await.unwrap_err();
    match err {
        HostError::PluginExecutionFailed {
            id: failed,
            fault: Fault::Panicked(message),
        } => {
            assert_eq!(failed, id);
            assert!(message.contains("eager plugin fault"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(snapshot(&host), before);
    assert_eq!(host.read_raw_storage(EagerPanic::tag(), 0), Word::ZERO);
    assert_eq!(recorder.count(), events_before);

    // The host stays usable and the next call commits normally.
    assert_eq!(host.execute(ALICE, id, 0).await.unwrap(), 0);
    assert_eq!(host.read_raw_storage(EagerPanic::tag(), 0), Word::from(99));
}

#[tokio::test]
async fn test_overflowing_multiplier_fails_cleanly() {
    let (mut host, recorder) = recorded_host();
    let address = host.deploy(Multiplier::new(2));
    let id = host.add_plugin(OPERATOR, address).unwrap();
    let events_before = recorder.count();

    let err = host.execute(ALICE, id, u64::MAX).await.unwrap_err();
    assert!(matches!(err, HostError::PluginExecutionFailed { .. }));
    assert!(err.to_string().contains("overflows"));
    assert_eq!(recorder.count(), events_before);
}

#[tokio::test]
async fn test_failure_does_not_touch_registry() {
    let (mut host, _) = recorded_host();
    let failing = host.deploy(FailingPlugin::new(SequentialCounter::tag()));
    let id = host.add_plugin(OPERATOR, failing).unwrap();

    let _ = host.execute(ALICE, id, 0).await;

    assert_eq!(host.lookup(id), failing);
    assert_eq!(host.reverse_lookup(&failing), id);
    assert_eq!(host.plugin_count(), 1);
}
