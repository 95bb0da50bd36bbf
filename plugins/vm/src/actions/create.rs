use async_trait::async_trait;
use stratus_action::prelude::*;
use stratus_cloud::{
    ChargeType, CloudError, DesiredState, Filter, InternetAccess, Mutation, Placement, Prepaid,
    RenewFlag, ResourceKind, RunInstanceSpec, Submission, SystemDisk, VpcAttachment,
    find_existing, wait_for_state,
};

use super::INSTANCE_STATE_RUNNING;
use crate::model::{VmInput, VmInputs, VmOutput, VmOutputs};
use crate::{VmRuntime, VmSettings, secret, validate};

/// `create`: launch instances and wait until they run.
///
/// A record whose `id` already names exactly one instance is reported as
/// is, without launching anything, so resubmitting a partially failed
/// batch is safe.
pub struct CreateVm {
    meta: ActionMetadata,
    runtime: VmRuntime,
}

impl CreateVm {
    /// Create the action.
    pub fn new(runtime: VmRuntime) -> Self {
        Self {
            meta: ActionMetadata::new(ActionKey::from_static("create"), "Create virtual machines"),
            runtime,
        }
    }

    async fn create_one(&self, vm: &VmInput, ctx: &ActionContext) -> Result<VmOutput, ActionError> {
        ctx.check_cancelled()?;
        let api = self.runtime.connect(&vm.provider_params)?;

        if let Some(existing) =
            find_existing(api.as_ref(), ResourceKind::Instance, vm.id.trim()).await?
        {
            return Ok(VmOutput::observed(
                &vm.guid,
                existing.request_id,
                &existing.observation,
            ));
        }

        let password = if vm.password.is_empty() {
            secret::generate_password()
        } else {
            vm.password.clone()
        };
        let spec = run_instance_spec(vm, self.runtime.settings(), password.clone())?;

        let Submission {
            request_id,
            resource_ids,
        } = api.mutate(Mutation::RunInstance(Box::new(spec))).await?;
        let id = resource_ids
            .into_iter()
            .next()
            .ok_or_else(|| CloudError::MalformedResponse {
                operation: "RunInstances",
                message: "no instance id returned".to_owned(),
            })?;
        tracing::info!(guid = %vm.guid, resource_id = %id, %request_id, "instance launch submitted");

        wait_for_state(
            api.as_ref(),
            self.runtime.clock(),
            self.runtime.settings().create_policy(),
            &ctx.cancellation,
            ResourceKind::Instance,
            &id,
            &DesiredState::state(INSTANCE_STATE_RUNNING),
        )
        .await?;

        let mut description = api
            .describe(ResourceKind::Instance, &Filter::instance_id(&id))
            .await?;
        if description.observations.len() != 1 {
            return Err(CloudError::NotFound {
                kind: ResourceKind::Instance,
                id,
            }
            .into());
        }
        let observation = description.observations.remove(0);

        let mut output = VmOutput::observed(&vm.guid, description.request_id, &observation);
        output.password = secret::seal(&vm.guid, &vm.seed, &password)
            .map_err(|e| ActionError::internal(e.to_string()))?;
        Ok(output)
    }
}

/// Launch request for one record.
fn run_instance_spec(
    vm: &VmInput,
    settings: &VmSettings,
    password: SecureString,
) -> Result<RunInstanceSpec, ActionError> {
    let charge_type = validate::charge_type(vm)?;
    let prepaid = (charge_type == Some(ChargeType::Prepaid)).then_some(Prepaid {
        period: vm.instance_charge_period,
        renew_flag: RenewFlag::NotifyAndAutoRenew,
    });

    Ok(RunInstanceSpec {
        placement: Placement {
            zone: vm.provider_params.available_zone.clone(),
            project_id: (vm.project_id != 0).then_some(vm.project_id),
        },
        image_id: vm.image_id.trim().to_owned(),
        instance_type: vm.instance_type.trim().to_owned(),
        instance_name: non_empty(&vm.instance_name),
        charge_type,
        prepaid,
        system_disk: SystemDisk {
            disk_type: settings.system_disk_type.clone(),
            size_gb: (vm.system_disk_size != 0).then_some(vm.system_disk_size),
        },
        vpc: VpcAttachment {
            vpc_id: vm.vpc_id.clone(),
            subnet_id: vm.subnet_id.clone(),
            private_ip_addresses: non_empty(&vm.instance_private_ip).into_iter().collect(),
        },
        password,
        internet: InternetAccess {
            public_ip_assigned: false,
            max_bandwidth_out: settings.internet_max_bandwidth_out,
        },
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

#[async_trait]
impl Action for CreateVm {
    type Input = VmInputs;
    type Output = VmOutputs;

    fn metadata(&self) -> &ActionMetadata {
        &self.meta
    }

    fn check_param(&self, input: &VmInputs) -> Result<(), ActionError> {
        input.inputs.iter().try_for_each(validate::check_create)
    }

    async fn execute(&self, input: VmInputs, ctx: &ActionContext) -> Result<VmOutputs, ActionError> {
        let mut outputs = Vec::with_capacity(input.inputs.len());
        for vm in &input.inputs {
            outputs.push(self.create_one(vm, ctx).await?);
        }
        Ok(VmOutputs { outputs })
    }
}
