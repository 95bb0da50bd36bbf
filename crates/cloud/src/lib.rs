//! # Stratus Cloud
//!
//! The seam between actions and a cloud provider.
//!
//! - [`CloudApi`]: submit [`Mutation`]s and describe resources through a
//!   [`Filter`], yielding [`Observation`]s
//! - [`CloudConnector`]: builds a client per input record from its
//!   [`ProviderParams`]
//! - [`wait_for_state`]: poll until a resource reaches a [`DesiredState`]
//! - [`find_existing`]: the idempotent-create guard
//!
//! Enable the `test-util` feature for [`testing::ScriptedCloud`].

#![warn(missing_docs)]

mod api;
mod error;
mod guard;
mod model;
mod provider;
mod reconcile;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use api::{CloudApi, CloudConnector};
pub use error::CloudError;
pub use guard::{Existing, find_existing};
pub use model::{
    ChargeType, Description, Filter, FilterName, InternetAccess, Mutation, Observation, Placement,
    Prepaid, RenewFlag, ResourceKind, RunInstanceSpec, Submission, SystemDisk, VpcAttachment,
};
pub use provider::ProviderParams;
pub use reconcile::{DesiredState, wait_for_state};
