use stratus_action::ActionRegistry;
use stratus_plugin::{Plugin, PluginKey};

use crate::{VmRuntime, actions};

/// The `vm` plugin.
///
/// ```
/// use std::sync::Arc;
/// use stratus_cloud::testing::ScriptedCloud;
/// use stratus_plugin::Plugin;
/// use stratus_vm::{VmPlugin, VmRuntime};
///
/// let plugin = VmPlugin::new(VmRuntime::new(Arc::new(ScriptedCloud::new())));
/// assert_eq!(plugin.key().as_str(), "vm");
/// assert!(plugin.action_by_name("create").is_ok());
/// assert!(plugin.action_by_name("reboot").is_err());
/// ```
#[derive(Debug)]
pub struct VmPlugin {
    key: PluginKey,
    actions: ActionRegistry,
}

impl VmPlugin {
    /// Registry name of the plugin.
    pub const NAME: &'static str = "vm";

    /// Build the plugin and its action table.
    pub fn new(runtime: VmRuntime) -> Self {
        Self {
            key: PluginKey::from_static(Self::NAME),
            actions: actions::registry(&runtime),
        }
    }
}

impl Plugin for VmPlugin {
    fn key(&self) -> &PluginKey {
        &self.key
    }

    fn actions(&self) -> &ActionRegistry {
        &self.actions
    }
}
