//! # Stratus Resilience
//!
//! Bounded waiting for eventually-consistent remote state.
//!
//! Cloud mutations are acknowledged long before their effect is visible.
//! [`wait_for`] re-observes a resource at a fixed interval until a predicate
//! holds or a hard timeout elapses:
//!
//! - no backoff and no jitter: every poll is one [`WaitPolicy::interval`] apart
//! - an observation error aborts the wait immediately ([`WaitError::Probe`]);
//!   only "not yet in the desired state" is retried
//! - exceeding [`WaitPolicy::timeout`] yields [`WaitError::Timeout`]
//! - a [`CancellationToken`](tokio_util::sync::CancellationToken) can abort
//!   the wait between polls
//!
//! Time comes from a [`Clock`], so tests can use [`ManualClock`] or tokio's
//! paused time instead of sleeping for real.

#![warn(missing_docs)]

mod clock;
mod error;
mod policy;
mod wait;

pub use clock::{Clock, ManualClock, TokioClock};
pub use error::WaitError;
pub use policy::WaitPolicy;
pub use wait::wait_for;
