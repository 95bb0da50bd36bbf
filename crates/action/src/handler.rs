//! Type-erased action handler.
//!
//! Action authors implement [`Action`](crate::Action); the host only ever
//! sees [`ActionHandler`]. The erased form keeps the three pipeline stages
//! separate so the host can drive and log each of them itself.

use std::any::Any;
use std::fmt;

use async_trait::async_trait;

use crate::action::ActionMetadata;
use crate::context::ActionContext;
use crate::error::ActionError;

/// Typed action input with its type erased.
///
/// Produced by [`ActionHandler::read_param`] and handed back to the same
/// handler for the remaining stages.
pub struct ErasedInput {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ErasedInput {
    /// Erase a typed input.
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Name of the erased type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the input as `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Recover the owned input as `T`, or give the erased value back.
    pub fn downcast<T: 'static>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        self.value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|value| Self { value, type_name })
    }
}

impl fmt::Debug for ErasedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedInput")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Object-safe action interface used by plugins and the host.
#[async_trait]
pub trait ActionHandler: Send + Sync + 'static {
    /// The action's static metadata.
    fn metadata(&self) -> &ActionMetadata;

    /// Decode the opaque payload.
    fn read_param(&self, params: serde_json::Value) -> Result<ErasedInput, ActionError>;

    /// Validate an input previously produced by [`read_param`](Self::read_param).
    fn check_param(&self, input: &ErasedInput) -> Result<(), ActionError>;

    /// Execute and serialize the output.
    async fn execute(
        &self,
        input: ErasedInput,
        ctx: &ActionContext,
    ) -> Result<serde_json::Value, ActionError>;
}
