//! Configuration presets for common scenarios

use super::{Config, DisplayConfig, Format};

impl Config {
    /// Create configuration from environment variables
    ///
    /// - `STRATUS_LOG`, falling back to `RUST_LOG`: level filter
    /// - `STRATUS_LOG_FORMAT`: `pretty`, `compact` or `json`
    /// - `STRATUS_LOG_TIME`, `STRATUS_LOG_SOURCE`, `STRATUS_LOG_COLORS`:
    ///   `0`/`false` disables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup("STRATUS_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = lookup("STRATUS_LOG_FORMAT") {
            config.format = format.parse().unwrap_or_default();
        }

        let flag = |key: &str| lookup(key).map(|v| v != "0" && v != "false");
        if let Some(time) = flag("STRATUS_LOG_TIME") {
            config.display.time = time;
        }
        if let Some(source) = flag("STRATUS_LOG_SOURCE") {
            config.display.source = source;
        }
        if let Some(colors) = flag("STRATUS_LOG_COLORS") {
            config.display.colors = colors;
        }

        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            display: DisplayConfig {
                colors: true,
                source: true,
                ..DisplayConfig::default()
            },
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                source: false,
                flatten: true,
                ..DisplayConfig::default()
            },
        }
    }
}
