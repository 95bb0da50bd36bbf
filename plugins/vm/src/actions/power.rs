use async_trait::async_trait;
use stratus_action::prelude::*;
use stratus_cloud::Mutation;

use crate::model::{VmInputs, VmOutput, VmOutputs};
use crate::{VmRuntime, validate};

/// Which way a [`PowerVm`] action flips the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Power {
    /// Boot a stopped instance.
    Start,
    /// Shut a running instance down.
    Stop,
}

impl Power {
    fn key(self) -> ActionKey {
        match self {
            Self::Start => ActionKey::from_static("start"),
            Self::Stop => ActionKey::from_static("stop"),
        }
    }

    fn mutation(self, id: String) -> Mutation {
        match self {
            Self::Start => Mutation::StartInstances(vec![id]),
            Self::Stop => Mutation::StopInstances(vec![id]),
        }
    }
}

/// `start` / `stop`: submit the power change and report the request id.
///
/// Does not wait for the new state.
pub struct PowerVm {
    meta: ActionMetadata,
    runtime: VmRuntime,
    power: Power,
}

impl PowerVm {
    /// Create the action for one direction.
    pub fn new(runtime: VmRuntime, power: Power) -> Self {
        let description = match power {
            Power::Start => "Start virtual machines",
            Power::Stop => "Stop virtual machines",
        };
        Self {
            meta: ActionMetadata::new(power.key(), description),
            runtime,
            power,
        }
    }
}

#[async_trait]
impl Action for PowerVm {
    type Input = VmInputs;
    type Output = VmOutputs;

    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    fn check_param(&self, input: &VmInputs) -> Result<(), ActionError> {
        validate::require_instance_ids(&input.inputs)
    }

    async fn execute(&self, input: VmInputs, ctx: &ActionContext) -> Result<VmOutputs, ActionError> {
        let mut outputs = Vec::with_capacity(input.inputs.len());
        for vm in &input.inputs {
            ctx.check_cancelled()?;
            let api = self.runtime.connect(&vm.provider_params)?;
            let id = vm.id.trim();

            let submission = api.mutate(self.power.mutation(id.to_owned())).await?;
            tracing::info!(
                guid = %vm.guid,
                resource_id = id,
                request_id = %submission.request_id,
                power = ?self.power,
                "power change submitted"
            );
            outputs.push(VmOutput::submitted(&vm.guid, id, submission.request_id));
        }
        Ok(VmOutputs { outputs })
    }
}
