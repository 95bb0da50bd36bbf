//! Convenience re-exports for action authors.
//!
//! ```rust,ignore
//! use stratus_action::prelude::*;
//! ```

pub use crate::action::{Action, ActionMetadata};
pub use crate::context::ActionContext;
pub use crate::error::ActionError;
pub use crate::registry::ActionRegistry;
pub use stratus_core::{ActionKey, SecureString};
