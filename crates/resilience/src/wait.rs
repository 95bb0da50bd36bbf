//! Fixed-interval wait-until-observed loop.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::{Clock, WaitError, WaitPolicy};

/// Poll `fetch` until `predicate` holds or the policy's timeout elapses.
///
/// Each iteration sleeps one interval, takes a fresh observation and tests
/// it. The first sleep happens before the first observation, so an
/// observation that already matches completes after exactly one interval.
/// An observation error ends the wait at once. The timeout is checked only
/// after a mismatch, so the wait gives up after roughly `timeout` (at most
/// one interval later), never earlier.
///
/// ```
/// use std::time::Duration;
/// use stratus_resilience::{ManualClock, WaitPolicy, wait_for};
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let clock = ManualClock::new();
/// let policy = WaitPolicy::new(Duration::from_secs(5), Duration::from_secs(60));
/// let mut states = vec!["RUNNING", "PENDING"];
///
/// let state = wait_for(
///     &clock,
///     policy,
///     &CancellationToken::new(),
///     || {
///         let next = states.pop();
///         async move { Ok::<_, std::convert::Infallible>(next) }
///     },
///     |s| *s == Some("RUNNING"),
/// )
/// .await
/// .unwrap();
///
/// assert_eq!(state, Some("RUNNING"));
/// assert_eq!(clock.elapsed(), Duration::from_secs(10));
/// # }
/// ```
pub async fn wait_for<C, F, Fut, O, E, P>(
    clock: &C,
    policy: WaitPolicy,
    cancel: &CancellationToken,
    mut fetch: F,
    predicate: P,
) -> Result<O, WaitError<E>>
where
    C: Clock + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<O, E>>,
    P: Fn(&O) -> bool,
{
    if policy.interval.is_zero() {
        return Err(WaitError::InvalidPolicy("poll interval must be non-zero"));
    }

    let started = clock.now();
    let mut polls: u32 = 0;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                let elapsed = clock.now().duration_since(started);
                tracing::debug!(polls, elapsed_ms = elapsed.as_millis() as u64, "wait cancelled");
                return Err(WaitError::Cancelled { elapsed, polls });
            }
            () = clock.sleep(policy.interval) => {}
        }

        polls = polls.saturating_add(1);
        let observation = match fetch().await {
            Ok(observation) => observation,
            Err(source) => return Err(WaitError::Probe { source, polls }),
        };

        let elapsed = clock.now().duration_since(started);
        if predicate(&observation) {
            tracing::debug!(polls, elapsed_ms = elapsed.as_millis() as u64, "desired state observed");
            return Ok(observation);
        }

        if elapsed > policy.timeout {
            tracing::warn!(
                polls,
                elapsed_ms = elapsed.as_millis() as u64,
                timeout_ms = policy.timeout.as_millis() as u64,
                "gave up waiting for desired state"
            );
            return Err(WaitError::Timeout { elapsed, polls });
        }

        tracing::trace!(polls, elapsed_ms = elapsed.as_millis() as u64, "desired state not yet observed");
    }
}
