//! # Stratus Log
//!
//! Logging setup for the plugin host, on top of `tracing-subscriber`.
//!
//! ```no_run
//! let config = stratus_log::Config::from_env();
//! stratus_log::init(&config).expect("logger");
//! tracing::info!("ready");
//! ```

#![warn(missing_docs)]

mod builder;
mod config;
mod error;

pub use builder::{init, parse_filter};
pub use config::{Config, DisplayConfig, Format};
pub use error::LogError;
