use async_trait::async_trait;
use stratus_action::prelude::*;
use stratus_cloud::{DesiredState, Mutation, ResourceKind, wait_for_state};

use crate::model::{VmInput, VmInputs, VmOutput, VmOutputs};
use crate::{VmRuntime, validate};

/// `terminate`: destroy instances and wait until they are no longer listed.
pub struct TerminateVm {
    meta: ActionMetadata,
    runtime: VmRuntime,
}

impl TerminateVm {
    /// Create the action.
    pub fn new(runtime: VmRuntime) -> Self {
        Self {
            meta: ActionMetadata::new(
                ActionKey::from_static("terminate"),
                "Terminate virtual machines",
            ),
            runtime,
        }
    }

    async fn terminate_one(
        &self,
        vm: &VmInput,
        ctx: &ActionContext,
    ) -> Result<VmOutput, ActionError> {
        ctx.check_cancelled()?;
        let api = self.runtime.connect(&vm.provider_params)?;
        let id = vm.id.trim();

        let submission = api
            .mutate(Mutation::TerminateInstances(vec![id.to_owned()]))
            .await?;
        tracing::info!(guid = %vm.guid, resource_id = id, request_id = %submission.request_id, "termination submitted");

        wait_for_state(
            api.as_ref(),
            self.runtime.clock(),
            self.runtime.settings().terminate_policy(),
            &ctx.cancellation,
            ResourceKind::Instance,
            id,
            &DesiredState::Absent,
        )
        .await?;

        Ok(VmOutput::submitted(&vm.guid, id, submission.request_id))
    }
}

#[async_trait]
impl Action for TerminateVm {
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
            outputs.push(self.terminate_one(vm, ctx).await?);
        }
        Ok(VmOutputs { outputs })
    }
}
