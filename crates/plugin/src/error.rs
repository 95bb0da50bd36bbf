//! Plugin error types.

use stratus_core::PluginKey;

/// Errors from plugin lookup and registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PluginError {
    /// No plugin is registered under the requested name.
    #[error("plugin `{0}` not found")]
    NotFound(String),

    /// The plugin exists but has no action with the requested name.
    #[error("plugin `{plugin}`: action `{action}` not found")]
    ActionNotFound {
        /// The plugin that was searched.
        plugin: PluginKey,
        /// The action name that was requested.
        action: String,
    },

    /// A plugin with this key is already registered.
    #[error("plugin `{0}` was registered twice")]
    AlreadyExists(PluginKey),
}
