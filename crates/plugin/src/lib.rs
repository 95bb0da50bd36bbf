//! # Stratus Plugin
//!
//! A **plugin** is a named bundle of actions for one resource kind, for
//! example `vm` or `security-group`. Plugins are registered once at process
//! start into a [`PluginRegistry`] and only read afterwards.
//!
//! ## Core Types
//!
//! - [`Plugin`]: base trait every plugin implements
//! - [`StaticPlugin`]: a plugin that is nothing but a key and an action table
//! - [`PluginRegistry`]: registry mapping [`PluginKey`] → `Arc<dyn Plugin>`
//! - [`PluginError`]: lookup and registration errors

#![warn(missing_docs)]

mod error;
mod plugin;
mod registry;

pub use error::PluginError;
pub use plugin::{Plugin, StaticPlugin};
pub use registry::PluginRegistry;

pub use stratus_core::PluginKey;
