//! # Stratus Action System
//!
//! An **action** is one named operation on one resource kind, such as
//! "create a VM" or "bind security groups". Every action runs as a fixed
//! three-stage pipeline driven by the host:
//!
//! 1. [`read_param`](Action::read_param): decode the opaque JSON payload
//!    into a typed input.
//! 2. [`check_param`](Action::check_param): validate the typed input
//!    without touching the network.
//! 3. [`execute`](Action::execute): perform the remote work and produce one
//!    output record per input record.
//!
//! ## Core Types
//!
//! - [`Action`]: typed trait implemented by action authors
//! - [`ActionHandler`]: object-safe form stored in plugins
//! - [`ActionAdapter`]: bridges an [`Action`] to an [`ActionHandler`]
//! - [`ActionRegistry`]: immutable name → handler table owned by a plugin
//! - [`ActionContext`]: per-request identity and cancellation
//! - [`ActionError`]: error taxonomy surfaced to callers
//!
//! ## Quick Start
//!
//! ```rust
//! use async_trait::async_trait;
//! use stratus_action::prelude::*;
//!
//! struct Echo(ActionMetadata);
//!
//! #[async_trait]
//! impl Action for Echo {
//!     type Input = serde_json::Value;
//!     type Output = serde_json::Value;
//!
//!     fn metadata(&self) -> &ActionMetadata { &self.0 }
//!
//!     async fn execute(
//!         &self,
//!         input: Self::Input,
//!         _ctx: &ActionContext,
//!     ) -> Result<Self::Output, ActionError> {
//!         Ok(input)
//!     }
//! }
//!
//! let registry = ActionRegistry::builder()
//!     .action(Echo(ActionMetadata::new(ActionKey::from_static("echo"), "Echo input")))
//!     .build();
//! assert!(registry.get("echo").is_ok());
//! ```

#![warn(missing_docs)]

/// Typed action trait and static metadata.
pub mod action;
/// Adapter bridging typed actions to [`ActionHandler`].
pub mod adapter;
/// Runtime context provided to actions during execution.
pub mod context;
/// Error taxonomy for every pipeline stage.
pub mod error;
/// Object-safe handler driven by the host.
pub mod handler;
/// Convenience re-exports for action authors.
pub mod prelude;
/// Immutable action table owned by a plugin.
pub mod registry;

pub use action::{Action, ActionMetadata};
pub use adapter::ActionAdapter;
pub use context::ActionContext;
pub use error::{ActionError, ErrorKind};
pub use handler::{ActionHandler, ErasedInput};
pub use registry::{ActionLookupError, ActionRegistry, ActionRegistryBuilder};

pub use stratus_core::{ActionKey, SecureString};
