//! Layered host configuration.
//!
//! Sources, later ones winning:
//!
//! 1. built-in defaults, with the log level and format taken from
//!    `STRATUS_LOG` / `RUST_LOG` / `STRATUS_LOG_FORMAT`
//! 2. an optional TOML file
//! 3. `STRATUS_`-prefixed environment variables, `__` separating nested
//!    keys (`STRATUS_VM__CREATE_TIMEOUT=3m`, `STRATUS_LOG__FORMAT=json`)

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use stratus_vm::VmSettings;

use crate::HostError;

/// Prefix of the environment variables read by [`HostConfig::load`].
pub const ENV_PREFIX: &str = "STRATUS_";

/// Everything the host reads at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Logger setup.
    pub log: stratus_log::Config,
    /// VM plugin tunables.
    pub vm: VmSettings,
}

impl HostConfig {
    /// The layered sources, without extracting.
    pub fn figment(file: Option<&Path>) -> Figment {
        let defaults = Self {
            log: stratus_log::Config::from_env(),
            vm: VmSettings::default(),
        };
        let mut figment = Figment::from(Serialized::defaults(defaults));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        // `STRATUS_LOG` is the bare level read by `stratus_log`, not a table.
        figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["log"]).split("__"))
    }

    /// Load the configuration. A missing file is not an error.
    pub fn load(file: Option<&Path>) -> Result<Self, HostError> {
        let config: Self = Self::figment(file).extract()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use stratus_log::Format;

    #[test]
    fn defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let config = HostConfig::load(None).unwrap();
            assert_eq!(config.vm, VmSettings::default());
            assert_eq!(config.log.display, stratus_log::DisplayConfig::default());
            Ok(())
        });
    }

    #[test]
    fn file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "stratus.toml",
                r#"
                    [log]
                    level = "debug"

                    [vm]
                    create_timeout = "3m"
                    system_disk_type = "CLOUD_SSD"
                "#,
            )?;
            jail.set_env("STRATUS_VM__SYSTEM_DISK_TYPE", "CLOUD_BASIC");
            jail.set_env("STRATUS_LOG__FORMAT", "json");

            let config = HostConfig::load(Some(Path::new("stratus.toml"))).unwrap();
            assert_eq!(config.log.level, "debug");
            assert_eq!(config.log.format, Format::Json);
            assert_eq!(config.vm.create_timeout, Duration::from_secs(180));
            assert_eq!(config.vm.system_disk_type, "CLOUD_BASIC");
            assert_eq!(config.vm.terminate_timeout, Duration::from_secs(600));
            Ok(())
        });
    }

    #[test]
    fn bare_log_level_variable() {
        Jail::expect_with(|jail| {
            jail.set_env("STRATUS_LOG", "warn");
            let config = HostConfig::load(None).unwrap();
            assert_eq!(config.log.level, "warn");
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_ignored() {
        Jail::expect_with(|_jail| {
            let config = HostConfig::load(Some(Path::new("absent.toml"))).unwrap();
            assert_eq!(config.vm, VmSettings::default());
            Ok(())
        });
    }

    #[test]
    fn bad_duration_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.set_env("STRATUS_VM__POLL_INTERVAL", "soon");
            let err = HostConfig::load(None).unwrap_err();
            assert!(matches!(err, HostError::Config(_)));
            Ok(())
        });
    }
}
