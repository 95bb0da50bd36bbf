//! Behaviour of the fixed-interval wait loop under simulated time.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::future::Ready;
use std::time::Duration;

use pretty_assertions::assert_eq;
use rstest::rstest;
use stratus_resilience::{ManualClock, TokioClock, WaitError, WaitPolicy, wait_for};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("describe failed")]
struct DescribeFailed;

const INTERVAL: Duration = Duration::from_secs(5);

fn policy(timeout: Duration) -> WaitPolicy {
    WaitPolicy::new(INTERVAL, timeout)
}

/// Reports `"PENDING"` for the first `pending` polls, then `"RUNNING"`.
fn flips_after(
    pending: u32,
    counter: &Arc<AtomicU32>,
) -> impl FnMut() -> Ready<Result<&'static str, DescribeFailed>> {
    let counter = Arc::clone(counter);
    move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        std::future::ready(Ok(if n < pending { "PENDING" } else { "RUNNING" }))
    }
}

#[tokio::test(start_paused = true)]
async fn succeeds_after_exactly_one_interval() {
    let polls = Arc::new(AtomicU32::new(0));
    let start = Instant::now();

    let state = wait_for(
        &TokioClock,
        policy(Duration::from_secs(120)),
        &CancellationToken::new(),
        flips_after(0, &polls),
        |s| *s == "RUNNING",
    )
    .await
    .unwrap();

    assert_eq!(state, "RUNNING");
    assert_eq!(polls.load(Ordering::SeqCst), 1);
    assert_eq!(start.elapsed(), INTERVAL);
}

#[tokio::test(start_paused = true)]
async fn succeeds_on_fourth_poll() {
    let polls = Arc::new(AtomicU32::new(0));
    let start = Instant::now();

    wait_for(
        &TokioClock,
        policy(Duration::from_secs(600)),
        &CancellationToken::new(),
        flips_after(3, &polls),
        |s| *s == "RUNNING",
    )
    .await
    .unwrap();

    assert_eq!(polls.load(Ordering::SeqCst), 4);
    assert_eq!(start.elapsed(), INTERVAL * 4);
}

#[rstest]
#[case::create_budget(Duration::from_secs(120), 25)]
#[case::terminate_budget(Duration::from_secs(600), 121)]
#[case::budget_not_multiple_of_interval(Duration::from_secs(12), 3)]
#[tokio::test(start_paused = true)]
async fn times_out_once_budget_exceeded(#[case] timeout: Duration, #[case] expected_polls: u32) {
    let start = Instant::now();

    let err = wait_for(
        &TokioClock,
        policy(timeout),
        &CancellationToken::new(),
        || std::future::ready(Ok::<_, DescribeFailed>("PENDING")),
        |s| *s == "RUNNING",
    )
    .await
    .unwrap_err();

    let (elapsed, polls) = match err {
        WaitError::Timeout { elapsed, polls } => (elapsed, polls),
        other => panic!("expected timeout, got {other:?}"),
    };
    assert_eq!(polls, expected_polls);
    assert_eq!(elapsed, start.elapsed());
    assert!(elapsed > timeout, "gave up early: {elapsed:?}");
    assert!(elapsed <= timeout + INTERVAL, "gave up late: {elapsed:?}");
}

#[tokio::test]
async fn observation_error_is_not_retried() {
    let clock = ManualClock::new();
    let calls = AtomicU32::new(0);

    let err = wait_for(
        &clock,
        policy(Duration::from_secs(120)),
        &CancellationToken::new(),
        || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(if n == 1 { Err(DescribeFailed) } else { Ok("PENDING") })
        },
        |s| *s == "RUNNING",
    )
    .await
    .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(err.polls(), 2);
    assert!(matches!(err, WaitError::Probe { source: DescribeFailed, polls: 2 }));
    assert_eq!(clock.sleeps(), vec![INTERVAL, INTERVAL]);
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_the_wait() {
    let cancel = CancellationToken::new();
    let polls = Arc::new(AtomicU32::new(0));

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(12)).await;
        trigger.cancel();
    });

    let err = wait_for(
        &TokioClock,
        policy(Duration::from_secs(600)),
        &cancel,
        flips_after(u32::MAX, &polls),
        |s| *s == "RUNNING",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, WaitError::Cancelled { polls: 2, .. }), "{err:?}");
    assert_eq!(polls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn already_cancelled_token_takes_no_observation() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let clock = ManualClock::new();

    let err = wait_for(
        &clock,
        policy(Duration::from_secs(60)),
        &cancel,
        || async { Ok::<_, DescribeFailed>("RUNNING") },
        |_| true,
    )
    .await
    .unwrap_err();

    assert_eq!(err.polls(), 0);
    assert!(matches!(err, WaitError::Cancelled { .. }));
    assert_eq!(clock.elapsed(), Duration::ZERO);
    assert!(clock.sleeps().is_empty());
}
