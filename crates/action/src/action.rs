use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use stratus_core::ActionKey;

use crate::context::ActionContext;
use crate::error::ActionError;

/// Static metadata describing an action.
#[derive(Debug, Clone)]
pub struct ActionMetadata {
    /// Name the action is looked up by inside its plugin (e.g. `"create"`).
    pub key: ActionKey,
    /// Short description of what this action does.
    pub description: String,
}

impl ActionMetadata {
    /// Create metadata for an action.
    pub fn new(key: ActionKey, description: impl Into<String>) -> Self {
        Self {
            key,
            description: description.into(),
        }
    }
}

/// A named, validated, executable operation on one resource kind.
///
/// The host calls the three stages strictly in order and stops at the first
/// error: [`execute`](Self::execute) is never reached when
/// [`check_param`](Self::check_param) fails.
///
/// # Object Safety
///
/// This trait has associated types and is not object-safe. Plugins store
/// actions behind [`ActionAdapter`](crate::ActionAdapter) as
/// `Arc<dyn ActionHandler>`.
#[async_trait]
pub trait Action: Send + Sync + 'static {
    /// Typed input decoded from the opaque request payload.
    type Input: DeserializeOwned + Send + Sync + 'static;
    /// Typed output, serialized back into the response payload.
    type Output: Serialize + Send + 'static;

    /// Static metadata describing this action.
    fn metadata(&self) -> &ActionMetadata;

    /// Decode the opaque payload into [`Self::Input`].
    ///
    /// Malformed payloads must produce [`ActionError::Decode`], never a panic.
    fn read_param(&self, params: serde_json::Value) -> Result<Self::Input, ActionError> {
        serde_json::from_value(params).map_err(|e| ActionError::decode(e.to_string()))
    }

    /// Structural and semantic validation. Must not perform remote calls.
    fn check_param(&self, _input: &Self::Input) -> Result<(), ActionError> {
        Ok(())
    }

    /// Perform the remote work, including any polling needed to observe
    /// completion.
    async fn execute(
        &self,
        input: Self::Input,
        ctx: &ActionContext,
    ) -> Result<Self::Output, ActionError>;
}
