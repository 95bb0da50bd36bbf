use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing of a wait: how often to observe and for how long at most.
///
/// Durations serialize in humantime form (`"5s"`, `"10m"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitPolicy {
    /// Delay before every observation.
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// Hard budget; the wait fails once elapsed time exceeds it.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl WaitPolicy {
    /// Poll interval used when none is configured.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

    /// Create a policy.
    pub const fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Create a policy with the default interval.
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self::new(Self::DEFAULT_INTERVAL, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_interval_is_five_seconds() {
        let policy = WaitPolicy::with_timeout(Duration::from_secs(120));
        assert_eq!(policy.interval, Duration::from_secs(5));
        assert_eq!(policy.timeout, Duration::from_secs(120));
    }

    #[test]
    fn humantime_serde() {
        let policy: WaitPolicy =
            serde_json::from_str(r#"{"interval":"2s","timeout":"10m"}"#).unwrap();
        assert_eq!(
            policy,
            WaitPolicy::new(Duration::from_secs(2), Duration::from_secs(600))
        );

        let json = serde_json::to_value(policy).unwrap();
        assert_eq!(json["interval"], "2s");
        assert_eq!(json["timeout"], "10m");
    }
}
