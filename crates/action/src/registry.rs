use std::collections::HashMap;
use std::sync::Arc;

use stratus_core::ActionKey;

use crate::action::{Action, ActionMetadata};
use crate::adapter::ActionAdapter;
use crate::handler::ActionHandler;

/// Immutable table of actions owned by one plugin.
///
/// Built once, when the plugin is constructed, and never mutated afterwards,
/// so lookups need no locking. Handlers are stored as
/// `Arc<dyn ActionHandler>` to allow shared ownership across concurrent
/// requests.
///
/// ```rust
/// use async_trait::async_trait;
/// use stratus_action::prelude::*;
///
/// struct NoOp(ActionMetadata);
///
/// #[async_trait]
/// impl Action for NoOp {
///     type Input = ();
///     type Output = ();
///     fn metadata(&self) -> &ActionMetadata { &self.0 }
///     async fn execute(&self, _: (), _: &ActionContext) -> Result<(), ActionError> { Ok(()) }
/// }
///
/// let registry = ActionRegistry::builder()
///     .action(NoOp(ActionMetadata::new(ActionKey::from_static("noop"), "Does nothing")))
///     .build();
///
/// assert!(registry.get("noop").is_ok());
/// assert!(registry.get("unknown").is_err());
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<ActionKey, Arc<dyn ActionHandler>>,
}

/// Error returned when an action name is not in a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("action `{name}` not found")]
pub struct ActionLookupError {
    /// The name that was looked up.
    pub name: String,
}

impl ActionRegistry {
    /// Start building a registry.
    pub fn builder() -> ActionRegistryBuilder {
        ActionRegistryBuilder::default()
    }

    /// Look up an action by name. The name must equal a registered key
    /// exactly; anything else is reported as not found.
    pub fn get(&self, name: &str) -> Result<Arc<dyn ActionHandler>, ActionLookupError> {
        ActionKey::exact(name)
            .ok()
            .and_then(|key| self.actions.get(&key).cloned())
            .ok_or_else(|| ActionLookupError {
                name: name.to_owned(),
            })
    }

    /// Check whether an action with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// Metadata for all registered actions, sorted by key.
    pub fn list(&self) -> Vec<&ActionMetadata> {
        let mut list: Vec<_> = self.actions.values().map(|a| a.metadata()).collect();
        list.sort_by(|a, b| a.key.cmp(&b.key));
        list
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if no actions are registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("count", &self.actions.len())
            .field(
                "keys",
                &self.list().iter().map(|m| m.key.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Builder for [`ActionRegistry`].
#[derive(Default)]
pub struct ActionRegistryBuilder {
    actions: HashMap<ActionKey, Arc<dyn ActionHandler>>,
}

impl ActionRegistryBuilder {
    /// Add a typed action, keyed by its metadata.
    ///
    /// # Panics
    ///
    /// Panics if an action with the same key was already added; action
    /// tables are fixed at compile time, so a duplicate is a programming error.
    pub fn action<A: Action>(self, action: A) -> Self {
        self.handler(Arc::new(ActionAdapter::new(action)))
    }

    /// Add an already type-erased handler.
    ///
    /// # Panics
    ///
    /// Panics on a duplicate key, like [`action`](Self::action).
    pub fn handler(mut self, handler: Arc<dyn ActionHandler>) -> Self {
        let key = handler.metadata().key.clone();
        assert!(
            !self.actions.contains_key(&key),
            "action `{key}` was registered twice"
        );
        self.actions.insert(key, handler);
        self
    }

    /// Freeze the table.
    pub fn build(self) -> ActionRegistry {
        ActionRegistry {
            actions: self.actions,
        }
    }
}
