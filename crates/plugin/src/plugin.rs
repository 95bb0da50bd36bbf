//! The base Plugin trait.

use std::sync::Arc;

use stratus_action::{ActionHandler, ActionRegistry};
use stratus_core::PluginKey;

use crate::PluginError;

/// Base trait for all plugins.
///
/// A plugin owns a static, read-only table of actions populated when the
/// plugin is constructed. This trait is **object-safe** so plugins can be
/// stored as `Arc<dyn Plugin>`.
pub trait Plugin: Send + Sync + 'static {
    /// The key this plugin is registered under.
    fn key(&self) -> &PluginKey;

    /// The plugin's action table.
    fn actions(&self) -> &ActionRegistry;

    /// Resolve an action name to its handler.
    fn action_by_name(&self, name: &str) -> Result<Arc<dyn ActionHandler>, PluginError> {
        self.actions()
            .get(name)
            .map_err(|e| PluginError::ActionNotFound {
                plugin: self.key().clone(),
                action: e.name,
            })
    }
}

/// A plugin that is nothing more than a key and an action table.
#[derive(Debug)]
pub struct StaticPlugin {
    key: PluginKey,
    actions: ActionRegistry,
}

impl StaticPlugin {
    /// Create a plugin from its parts.
    pub fn new(key: PluginKey, actions: ActionRegistry) -> Self {
        Self { key, actions }
    }
}

impl Plugin for StaticPlugin {
    fn key(&self) -> &PluginKey {
        &self.key
    }

    fn actions(&self) -> &ActionRegistry {
        &self.actions
    }
}
