use async_trait::async_trait;
use stratus_action::prelude::*;
use stratus_cloud::Mutation;

use crate::model::{BindSecurityGroupsInputs, BindSecurityGroupsOutput, BindSecurityGroupsOutputs};
use crate::{VmRuntime, validate};

/// `bind-security-groups`: replace the security groups of instances.
pub struct BindSecurityGroups {
    meta: ActionMetadata,
    runtime: VmRuntime,
}

impl BindSecurityGroups {
    /// Create the action.
    pub fn new(runtime: VmRuntime) -> Self {
        Self {
            meta: ActionMetadata::new(
                ActionKey::from_static("bind-security-groups"),
                "Assign security groups to virtual machines",
            ),
            runtime,
        }
    }
}

#[async_trait]
impl Action for BindSecurityGroups {
    type Input = BindSecurityGroupsInputs;
    type Output = BindSecurityGroupsOutputs;

    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    fn check_param(&self, input: &BindSecurityGroupsInputs) -> Result<(), ActionError> {
        input.inputs.iter().try_for_each(validate::check_bind)
    }

    async fn execute(
        &self,
        input: BindSecurityGroupsInputs,
        ctx: &ActionContext,
    ) -> Result<BindSecurityGroupsOutputs, ActionError> {
        let mut outputs = Vec::with_capacity(input.inputs.len());
        for record in &input.inputs {
            ctx.check_cancelled()?;
            let api = self.runtime.connect(&record.provider_params)?;
            let security_group_ids = record.security_groups();

            let submission = api
                .mutate(Mutation::AssignSecurityGroups {
                    instance_ids: vec![record.instance_id.trim().to_owned()],
                    security_group_ids,
                })
                .await?;
            tracing::info!(
                guid = %record.guid,
                resource_id = %record.instance_id,
                request_id = %submission.request_id,
                "security groups assigned"
            );
            outputs.push(BindSecurityGroupsOutput {
                guid: record.guid.clone(),
            });
        }
        Ok(BindSecurityGroupsOutputs { outputs })
    }
}
