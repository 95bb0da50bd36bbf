//! The VM action table.
//!
//! Every action processes its input records one at a time, in order, and
//! fails the whole call on the first failing record.

mod create;
mod power;
mod security_groups;
mod terminate;

pub use create::CreateVm;
pub use power::{Power, PowerVm};
pub use security_groups::BindSecurityGroups;
pub use terminate::TerminateVm;

use stratus_action::ActionRegistry;

use crate::VmRuntime;

/// State reported by a booted instance.
pub const INSTANCE_STATE_RUNNING: &str = "RUNNING";

/// Build the action table of the VM plugin.
pub fn registry(runtime: &VmRuntime) -> ActionRegistry {
    ActionRegistry::builder()
        .action(CreateVm::new(runtime.clone()))
        .action(TerminateVm::new(runtime.clone()))
        .action(PowerVm::new(runtime.clone(), Power::Start))
        .action(PowerVm::new(runtime.clone(), Power::Stop))
        .action(BindSecurityGroups::new(runtime.clone()))
        .build()
}
