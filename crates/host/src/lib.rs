#![warn(missing_docs)]

//! # Stratus Host
//!
//! The entry point of the plugin host: `Process(PluginRequest) ->
//! PluginResponse`.
//!
//! This crate provides:
//! - [`Host`]: resolves plugin and action, runs the read / check / execute
//!   pipeline and normalizes the outcome
//! - [`PluginRequest`] / [`PluginResponse`] / [`ResultCode`]: the envelopes
//! - [`HostConfig`]: layered configuration (defaults, TOML, environment)
//! - [`bootstrap`] / [`default_registry`]: wiring of the built-in plugins
//!
//! ```no_run
//! # async fn run(connector: std::sync::Arc<dyn stratus_cloud::CloudConnector>) -> Result<(), stratus_host::HostError> {
//! use stratus_host::{HostConfig, PluginRequest, bootstrap};
//!
//! let config = HostConfig::load(None)?;
//! let host = bootstrap(&config, connector)?;
//! let response = host
//!     .process(PluginRequest::new("vm", "start", serde_json::json!({"inputs": []})))
//!     .await;
//! assert!(response.is_success());
//! # Ok(())
//! # }
//! ```

mod bootstrap;
pub mod config;
mod error;
mod host;
mod request;

pub use bootstrap::{bootstrap, default_registry};
pub use config::HostConfig;
pub use error::HostError;
pub use host::Host;
pub use request::{PluginRequest, PluginResponse, ResultCode};
