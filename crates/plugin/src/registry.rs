//! Process-wide plugin registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use stratus_core::PluginKey;

use crate::{Plugin, PluginError};

/// Registry mapping [`PluginKey`] to a shared plugin instance.
///
/// Populated once during process initialization, then read concurrently by
/// every request. Insertion takes the write lock, lookups share the read
/// lock. There is no deregistration.
///
/// The registry is an explicit value handed to the host, not a global, so
/// tests can build isolated registries with fake plugins.
///
/// ```
/// use std::sync::Arc;
/// use stratus_action::ActionRegistry;
/// use stratus_plugin::{PluginKey, PluginRegistry, StaticPlugin};
///
/// let registry = PluginRegistry::new();
/// registry.register(Arc::new(StaticPlugin::new(
///     PluginKey::from_static("vm"),
///     ActionRegistry::builder().build(),
/// )));
///
/// assert!(registry.lookup("vm").is_ok());
/// assert!(registry.lookup("storage").is_err());
/// ```
pub struct PluginRegistry {
    plugins: RwLock<HashMap<PluginKey, Arc<dyn Plugin>>>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(HashMap::new()),
        }
    }

    /// Register a plugin.
    ///
    /// # Panics
    ///
    /// Panics if a plugin with the same key is already registered. Plugins
    /// are registered at startup from code, so a duplicate is a programming
    /// mistake and the process must not start.
    pub fn register(&self, plugin: Arc<dyn Plugin>) {
        if let Err(e) = self.try_register(plugin) {
            tracing::error!(error = %e, "plugin registry invariant violated");
            panic!("{e}");
        }
    }

    /// Register a plugin, reporting a duplicate key as an error.
    pub fn try_register(&self, plugin: Arc<dyn Plugin>) -> Result<(), PluginError> {
        let key = plugin.key().clone();
        let mut plugins = self.plugins.write();
        if plugins.contains_key(&key) {
            return Err(PluginError::AlreadyExists(key));
        }
        tracing::debug!(plugin = %key, actions = plugin.actions().len(), "plugin registered");
        plugins.insert(key, plugin);
        Ok(())
    }

    /// Look up a plugin by raw name. The name must equal a registered key
    /// exactly; anything else is reported as not found.
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn Plugin>, PluginError> {
        let not_found = || PluginError::NotFound(name.to_owned());
        let key = PluginKey::exact(name).map_err(|_| not_found())?;
        self.plugins.read().get(&key).cloned().ok_or_else(not_found)
    }

    /// Whether a plugin with the given key exists.
    pub fn contains(&self, key: &PluginKey) -> bool {
        self.plugins.read().contains_key(key)
    }

    /// All registered keys, sorted.
    pub fn keys(&self) -> Vec<PluginKey> {
        let mut keys: Vec<_> = self.plugins.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.read().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.plugins.read().is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("count", &self.len())
            .field("keys", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticPlugin;
    use pretty_assertions::assert_eq;
    use stratus_action::ActionRegistry;

    fn stub(key: &'static str) -> Arc<dyn Plugin> {
        Arc::new(StaticPlugin::new(
            PluginKey::from_static(key),
            ActionRegistry::builder().build(),
        ))
    }

    #[test]
    fn register_and_lookup() {
        let reg = PluginRegistry::new();
        reg.register(stub("vm"));

        let plugin = reg.lookup("vm").unwrap();
        assert_eq!(plugin.key().as_str(), "vm");
        assert!(reg.contains(&PluginKey::from_static("vm")));
    }

    #[test]
    fn lookup_matches_exactly() {
        let reg = PluginRegistry::new();
        reg.register(stub("security-group"));
        assert!(reg.lookup("security-group").is_ok());
        for name in ["Security-Group", " security-group", "security-group "] {
            let err = reg.lookup(name).err().unwrap();
            assert_eq!(err, PluginError::NotFound(name.into()));
        }
    }

    #[test]
    fn lookup_missing_is_not_found() {
        let reg = PluginRegistry::new();
        let err = reg.lookup("storage").err().unwrap();
        assert_eq!(err, PluginError::NotFound("storage".into()));
    }

    #[test]
    fn lookup_invalid_name_is_not_found() {
        let reg = PluginRegistry::new();
        let err = reg.lookup("no such plugin!").err().unwrap();
        assert_eq!(err.to_string(), "plugin `no such plugin!` not found");
    }

    #[test]
    fn try_register_duplicate_fails() {
        let reg = PluginRegistry::new();
        reg.try_register(stub("vm")).unwrap();
        let err = reg.try_register(stub("vm")).unwrap_err();
        assert_eq!(err, PluginError::AlreadyExists(PluginKey::from_static("vm")));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    #[should_panic(expected = "plugin `vm` was registered twice")]
    fn register_duplicate_is_fatal() {
        let reg = PluginRegistry::new();
        reg.register(stub("vm"));
        reg.register(stub("vm"));
    }

    #[test]
    fn keys_are_sorted() {
        let reg = PluginRegistry::new();
        reg.register(stub("vpc"));
        reg.register(stub("eip"));
        reg.register(stub("vm"));
        let keys: Vec<String> = reg.keys().into_iter().map(String::from).collect();
        assert_eq!(keys, vec!["eip", "vm", "vpc"]);
        assert!(!reg.is_empty());
        assert!(format!("{reg:?}").contains("count: 3"));
    }

    #[test]
    fn concurrent_lookups() {
        let reg = Arc::new(PluginRegistry::new());
        reg.register(stub("vm"));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let reg = Arc::clone(&reg);
                std::thread::spawn(move || reg.lookup("vm").is_ok())
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
