//! # Stratus VM
//!
//! The `vm` plugin: virtual machine lifecycle on top of [`stratus_cloud`].
//!
//! | Action | Remote work | Waits for |
//! |--------|-------------|-----------|
//! | `create` | guard describe, `RunInstances` | `RUNNING` |
//! | `terminate` | `TerminateInstances` | instance absent |
//! | `start` | `StartInstances` | - |
//! | `stop` | `StopInstances` | - |
//! | `bind-security-groups` | `ModifyInstancesAttribute` | - |
//!
//! Passwords of newly created instances are returned sealed, see
//! [`secret`].

#![warn(missing_docs)]

mod actions;
mod model;
mod plugin;
mod query;
mod runtime;
mod settings;
mod validate;

pub mod secret;

pub use actions::{
    BindSecurityGroups, CreateVm, INSTANCE_STATE_RUNNING, Power, PowerVm, TerminateVm,
};
pub use model::{
    BindSecurityGroupsInput, BindSecurityGroupsInputs, BindSecurityGroupsOutput,
    BindSecurityGroupsOutputs, VmInput, VmInputs, VmOutput, VmOutputs,
};
pub use plugin::VmPlugin;
pub use query::query_instances;
pub use runtime::VmRuntime;
pub use settings::VmSettings;
