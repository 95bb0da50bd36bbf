use std::time::Duration;

use serde::{Deserialize, Serialize};
use stratus_resilience::WaitPolicy;

/// Tunables of the VM plugin.
///
/// Durations are written in humantime form (`"5s"`, `"10m"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmSettings {
    /// Delay between state polls.
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    /// How long `create` waits for an instance to report `RUNNING`.
    #[serde(with = "humantime_serde")]
    pub create_timeout: Duration,
    /// How long `terminate` waits for an instance to disappear.
    #[serde(with = "humantime_serde")]
    pub terminate_timeout: Duration,
    /// Disk class of new system disks.
    pub system_disk_type: String,
    /// Outbound bandwidth cap of new instances, in Mbps.
    pub internet_max_bandwidth_out: u32,
}

impl Default for VmSettings {
    fn default() -> Self {
        Self {
            poll_interval: WaitPolicy::DEFAULT_INTERVAL,
            create_timeout: Duration::from_secs(120),
            terminate_timeout: Duration::from_secs(600),
            system_disk_type: "CLOUD_PREMIUM".to_string(),
            internet_max_bandwidth_out: 10,
        }
    }
}

impl VmSettings {
    /// Wait used after launching an instance.
    pub fn create_policy(&self) -> WaitPolicy {
        WaitPolicy::new(self.poll_interval, self.create_timeout)
    }

    /// Wait used after terminating an instance.
    pub fn terminate_policy(&self) -> WaitPolicy {
        WaitPolicy::new(self.poll_interval, self.terminate_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let settings = VmSettings::default();
        assert_eq!(
            settings.create_policy(),
            WaitPolicy::new(Duration::from_secs(5), Duration::from_secs(120))
        );
        assert_eq!(settings.terminate_policy().timeout, Duration::from_secs(600));
        assert_eq!(settings.system_disk_type, "CLOUD_PREMIUM");
        assert_eq!(settings.internet_max_bandwidth_out, 10);
    }

    #[test]
    fn partial_override() {
        let settings: VmSettings =
            serde_json::from_str(r#"{"create_timeout":"3m","poll_interval":"2s"}"#).unwrap();
        assert_eq!(settings.create_timeout, Duration::from_secs(180));
        assert_eq!(settings.poll_interval, Duration::from_secs(2));
        assert_eq!(settings.terminate_timeout, Duration::from_secs(600));
    }
}
