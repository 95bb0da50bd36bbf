use std::time::Duration;

/// Why a [`wait_for`](crate::wait_for) did not observe the desired state.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WaitError<E> {
    /// The predicate never held within the policy's timeout.
    #[error("desired state not observed after {elapsed:?} ({polls} polls)")]
    Timeout {
        /// Time spent waiting.
        elapsed: Duration,
        /// Number of observations taken.
        polls: u32,
    },

    /// Taking an observation failed. Never retried.
    #[error("observation {polls} failed: {source}")]
    Probe {
        /// The underlying observation error.
        source: E,
        /// Index of the failed observation (1-based).
        polls: u32,
    },

    /// The cancellation token fired.
    #[error("wait cancelled after {polls} polls")]
    Cancelled {
        /// Time spent waiting.
        elapsed: Duration,
        /// Number of observations taken.
        polls: u32,
    },

    /// The policy cannot make progress (zero interval).
    #[error("invalid wait policy: {0}")]
    InvalidPolicy(&'static str),
}

impl<E> WaitError<E> {
    /// Number of observations taken before the wait ended.
    pub fn polls(&self) -> u32 {
        match self {
            Self::Timeout { polls, .. }
            | Self::Probe { polls, .. }
            | Self::Cancelled { polls, .. } => *polls,
            Self::InvalidPolicy(_) => 0,
        }
    }
}
