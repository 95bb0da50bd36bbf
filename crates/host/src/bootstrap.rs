use std::sync::Arc;

use stratus_cloud::CloudConnector;
use stratus_plugin::PluginRegistry;
use stratus_vm::{VmPlugin, VmRuntime};

use crate::{Host, HostConfig, HostError};

/// Registry with every built-in plugin.
///
/// # Panics
///
/// Panics if two built-in plugins share a key.
pub fn default_registry(connector: Arc<dyn CloudConnector>, config: &HostConfig) -> PluginRegistry {
    let registry = PluginRegistry::new();
    let vm = VmRuntime::new(connector).with_settings(config.vm.clone());
    registry.register(Arc::new(VmPlugin::new(vm)));
    registry
}

/// Install the logger and build a host with every built-in plugin.
///
/// Call once per process: a second call fails with [`HostError::Log`].
pub fn bootstrap(config: &HostConfig, connector: Arc<dyn CloudConnector>) -> Result<Host, HostError> {
    stratus_log::init(&config.log)?;
    let registry = default_registry(connector, config);
    tracing::info!(plugins = ?registry.keys(), "host ready");
    Ok(Host::new(Arc::new(registry)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratus_cloud::testing::ScriptedCloud;

    #[test]
    fn registry_holds_the_vm_plugin() {
        let registry = default_registry(Arc::new(ScriptedCloud::new()), &HostConfig::default());
        assert_eq!(registry.len(), 1);
        assert!(registry.lookup("vm").is_ok());
    }
}
