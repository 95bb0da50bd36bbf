//! # Stratus Core
//!
//! Identifier and value types shared by every Stratus crate.
//!
//! - [`PluginKey`] / [`ActionKey`]: validated names used by the plugin
//!   registry and by each plugin's action table.
//! - [`SecureString`]: a string that never shows up in logs.
//!
//! ```rust
//! use stratus_core::{ActionKey, PluginKey};
//!
//! let plugin: PluginKey = "VM".parse().unwrap();
//! let action: ActionKey = "bind-security-groups".parse().unwrap();
//! assert_eq!(plugin.as_str(), "vm");
//! assert_eq!(action.as_str(), "bind-security-groups");
//! ```

#![warn(missing_docs)]

mod keys;
mod secure;

pub use keys::{ActionKey, KeyError, PluginKey};
pub use secure::SecureString;
