//! Input and output records of the VM actions.

use serde::{Deserialize, Serialize};
use stratus_cloud::{Observation, ProviderParams};
use stratus_core::SecureString;

/// Payload of `create`, `terminate`, `start` and `stop`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VmInputs {
    /// One record per instance.
    pub inputs: Vec<VmInput>,
}

/// One instance to act on.
///
/// Every field is optional in the payload; which ones are required depends
/// on the action.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VmInput {
    /// Caller-side correlation id, echoed in the output.
    pub guid: String,
    /// Mixed with `guid` to derive the password sealing key.
    pub seed: SecureString,
    /// Region and credentials (`Key=Value;...`).
    pub provider_params: ProviderParams,
    /// Existing instance id. Accepted as `id` or `instance_id`.
    #[serde(alias = "instance_id")]
    pub id: String,
    /// VPC the instance joins.
    pub vpc_id: String,
    /// Subnet inside `vpc_id`.
    pub subnet_id: String,
    /// Display name; empty lets the provider pick.
    pub instance_name: String,
    /// Instance size, e.g. `S1.SMALL1`.
    pub instance_type: String,
    /// Image to boot.
    pub image_id: String,
    /// System disk size in GiB; `0` uses the image default.
    pub system_disk_size: u64,
    /// `""`, `POSTPAID_BY_HOUR` or `PREPAID`.
    pub instance_charge_type: String,
    /// Prepaid period in months.
    pub instance_charge_period: u32,
    /// Fixed private address; empty lets the provider pick.
    pub instance_private_ip: String,
    /// Login password; generated when empty.
    pub password: SecureString,
    /// `0` means the default project.
    pub project_id: i64,
}

/// Result of the VM actions, one record per input record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmOutputs {
    /// Records in input order.
    pub outputs: Vec<VmOutput>,
}

/// What happened to one instance. Empty fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmOutput {
    /// Echo of the input `guid`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub guid: String,
    /// Provider request id of the last call relevant to this record.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub request_id: String,
    /// Instance id.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Core count.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cpu: String,
    /// Memory size as reported by the provider.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub memory: String,
    /// Sealed login password, set only for newly created instances.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    /// Observed state, e.g. `RUNNING`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instance_state: String,
    /// Primary private address.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instance_private_ip: String,
}

impl VmOutput {
    /// Output for a submitted call with no observation.
    pub fn submitted(guid: &str, id: &str, request_id: impl Into<String>) -> Self {
        Self {
            guid: guid.to_owned(),
            id: id.to_owned(),
            request_id: request_id.into(),
            ..Self::default()
        }
    }

    /// Output reporting an observed instance.
    pub fn observed(guid: &str, request_id: impl Into<String>, observation: &Observation) -> Self {
        Self {
            guid: guid.to_owned(),
            request_id: request_id.into(),
            id: observation.id.clone(),
            cpu: observation.cpu.to_string(),
            memory: observation.memory.to_string(),
            instance_state: observation.state.clone(),
            instance_private_ip: observation
                .primary_private_ip()
                .unwrap_or_default()
                .to_owned(),
            ..Self::default()
        }
    }
}

/// Payload of `bind-security-groups`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BindSecurityGroupsInputs {
    /// One record per instance.
    pub inputs: Vec<BindSecurityGroupsInput>,
}

/// Security groups to assign to one instance.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BindSecurityGroupsInput {
    /// Caller-side correlation id.
    pub guid: String,
    /// Region and credentials.
    pub provider_params: ProviderParams,
    /// Target instance.
    pub instance_id: String,
    /// Comma separated security group ids.
    pub security_group_ids: String,
}

impl BindSecurityGroupsInput {
    /// Security group ids, trimmed, empty entries dropped.
    pub fn security_groups(&self) -> Vec<String> {
        self.security_group_ids
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

/// Result of `bind-security-groups`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindSecurityGroupsOutputs {
    /// Records in input order.
    pub outputs: Vec<BindSecurityGroupsOutput>,
}

/// Acknowledgement for one instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindSecurityGroupsOutput {
    /// Echo of the input `guid`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub guid: String,
}
