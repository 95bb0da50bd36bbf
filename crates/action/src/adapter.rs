//! Adapter for [`Action`] to [`ActionHandler`].

use async_trait::async_trait;

use crate::action::{Action, ActionMetadata};
use crate::context::ActionContext;
use crate::error::ActionError;
use crate::handler::{ActionHandler, ErasedInput};

/// Adapter that wraps a typed [`Action`] as an [`ActionHandler`].
///
/// Handles the typed/erased boundary:
/// 1. `read_param` decodes JSON into `A::Input` and erases it
/// 2. `check_param` recovers `&A::Input` and delegates
/// 3. `execute` recovers `A::Input`, runs the action and serializes `A::Output`
pub struct ActionAdapter<A> {
    action: A,
}

impl<A> ActionAdapter<A> {
    /// Wrap an action in an adapter.
    pub fn new(action: A) -> Self {
        Self { action }
    }
}

impl<A: Action> ActionAdapter<A> {
    fn mismatch(&self, input: &ErasedInput) -> ActionError {
        ActionError::internal(format!(
            "action `{}` expected input {}, got {}",
            self.action.metadata().key,
            std::any::type_name::<A::Input>(),
            input.type_name()
        ))
    }
}

#[async_trait]
impl<A: Action> ActionHandler for ActionAdapter<A> {
    fn metadata(&self) -> &ActionMetadata {
        self.action.metadata()
    }

    fn read_param(&self, params: serde_json::Value) -> Result<ErasedInput, ActionError> {
        self.action.read_param(params).map(ErasedInput::new)
    }

    fn check_param(&self, input: &ErasedInput) -> Result<(), ActionError> {
        let typed = input
            .downcast_ref::<A::Input>()
            .ok_or_else(|| self.mismatch(input))?;
        self.action.check_param(typed)
    }

    async fn execute(
        &self,
        input: ErasedInput,
        ctx: &ActionContext,
    ) -> Result<serde_json::Value, ActionError> {
        let typed = match input.downcast::<A::Input>() {
            Ok(typed) => typed,
            Err(input) => return Err(self.mismatch(&input)),
        };
        let output = self.action.execute(typed, ctx).await?;
        serde_json::to_value(output)
            .map_err(|e| ActionError::internal(format!("output serialization failed: {e}")))
    }
}

impl<A: Action> std::fmt::Debug for ActionAdapter<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionAdapter")
            .field("action_key", &self.action.metadata().key)
            .finish()
    }
}
