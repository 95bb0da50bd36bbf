//! Requests to and observations from the cloud provider.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stratus_core::SecureString;

use crate::CloudError;

/// Kind of remote resource being described or mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ResourceKind {
    /// A virtual machine.
    Instance,
}

impl ResourceKind {
    /// Lowercase name used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Instance => "instance",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute a describe call filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FilterName {
    /// Instance identifier.
    InstanceId,
    /// Primary private IPv4 address.
    PrivateIpAddress,
}

impl FilterName {
    /// Name as accepted in request payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InstanceId => "instanceId",
            Self::PrivateIpAddress => "privateIpAddress",
        }
    }

    /// Name as sent to the provider.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::InstanceId => "instance-id",
            Self::PrivateIpAddress => "private-ip-address",
        }
    }
}

impl FromStr for FilterName {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instanceId" => Ok(Self::InstanceId),
            "privateIpAddress" => Ok(Self::PrivateIpAddress),
            other => Err(CloudError::InvalidFilter(other.to_owned())),
        }
    }
}

impl TryFrom<String> for FilterName {
    type Error = CloudError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FilterName> for String {
    fn from(name: FilterName) -> Self {
        name.as_str().to_owned()
    }
}

impl fmt::Display for FilterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describe filter: resources whose `name` attribute is any of `values`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Attribute to match.
    pub name: FilterName,
    /// Accepted values.
    pub values: Vec<String>,
}

impl Filter {
    /// Filter on a single instance id.
    pub fn instance_id(id: impl Into<String>) -> Self {
        Self {
            name: FilterName::InstanceId,
            values: vec![id.into()],
        }
    }

    /// Filter on private IP addresses.
    pub fn private_ip<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: FilterName::PrivateIpAddress,
            values: addresses.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `observation` satisfies this filter.
    pub fn matches(&self, observation: &Observation) -> bool {
        match self.name {
            FilterName::InstanceId => self.values.iter().any(|v| *v == observation.id),
            FilterName::PrivateIpAddress => observation
                .private_ips
                .iter()
                .any(|ip| self.values.contains(ip)),
        }
    }
}

/// Point-in-time snapshot of a remote resource.
///
/// Only valid for the poll that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Provider identifier.
    pub id: String,
    /// Lifecycle state, e.g. `"PENDING"`, `"RUNNING"`.
    pub state: String,
    /// vCPU count.
    pub cpu: u32,
    /// Memory, in the provider's unit.
    pub memory: u32,
    /// Private IPv4 addresses, primary first.
    pub private_ips: Vec<String>,
}

impl Observation {
    /// Primary private address, if any.
    pub fn primary_private_ip(&self) -> Option<&str> {
        self.private_ips.first().map(String::as_str)
    }
}

/// Result of a describe call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    /// Provider request id of the describe call.
    pub request_id: String,
    /// Every resource that matched the filter.
    pub observations: Vec<Observation>,
}

/// Acknowledgement of a mutating call.
///
/// The effect may not be visible yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    /// Provider request id of the call.
    pub request_id: String,
    /// Identifiers of resources the call created, in request order.
    pub resource_ids: Vec<String>,
}

/// A state-changing call against the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Mutation {
    /// Launch one instance.
    RunInstance(Box<RunInstanceSpec>),
    /// Destroy instances.
    TerminateInstances(Vec<String>),
    /// Boot stopped instances.
    StartInstances(Vec<String>),
    /// Shut down running instances.
    StopInstances(Vec<String>),
    /// Replace the security groups of instances.
    AssignSecurityGroups {
        /// Target instances.
        instance_ids: Vec<String>,
        /// Security groups to assign.
        security_group_ids: Vec<String>,
    },
}

impl Mutation {
    /// Provider API operation name.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::RunInstance(_) => "RunInstances",
            Self::TerminateInstances(_) => "TerminateInstances",
            Self::StartInstances(_) => "StartInstances",
            Self::StopInstances(_) => "StopInstances",
            Self::AssignSecurityGroups { .. } => "ModifyInstancesAttribute",
        }
    }
}

/// Billing mode of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargeType {
    /// Pay-as-you-go, billed hourly.
    PostpaidByHour,
    /// Paid up front for a fixed period.
    Prepaid,
}

impl ChargeType {
    /// Provider spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PostpaidByHour => "POSTPAID_BY_HOUR",
            Self::Prepaid => "PREPAID",
        }
    }
}

impl FromStr for ChargeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POSTPAID_BY_HOUR" => Ok(Self::PostpaidByHour),
            "PREPAID" => Ok(Self::Prepaid),
            other => Err(format!("unsupported instance charge type `{other}`")),
        }
    }
}

impl fmt::Display for ChargeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens when a prepaid period ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum RenewFlag {
    /// Notify the owner and renew automatically.
    #[default]
    NotifyAndAutoRenew,
}

/// Prepaid billing block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prepaid {
    /// Billing period in months.
    pub period: u32,
    /// Renewal behaviour.
    pub renew_flag: RenewFlag,
}

/// Where the instance is placed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    /// Availability zone.
    pub zone: String,
    /// Owning project, if not the default one.
    pub project_id: Option<i64>,
}

/// Boot disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemDisk {
    /// Provider disk class, e.g. `"CLOUD_PREMIUM"`.
    pub disk_type: String,
    /// Size in GiB; `None` uses the image default.
    pub size_gb: Option<u64>,
}

/// Network attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VpcAttachment {
    /// VPC id.
    pub vpc_id: String,
    /// Subnet id.
    pub subnet_id: String,
    /// Fixed private addresses; empty lets the provider assign one.
    pub private_ip_addresses: Vec<String>,
}

/// Public network access.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InternetAccess {
    /// Whether a public IP is allocated.
    pub public_ip_assigned: bool,
    /// Outbound bandwidth cap in Mbps.
    pub max_bandwidth_out: u32,
}

/// Everything needed to launch one instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunInstanceSpec {
    /// Placement.
    pub placement: Placement,
    /// Image to boot.
    pub image_id: String,
    /// Instance size.
    pub instance_type: String,
    /// Display name.
    pub instance_name: Option<String>,
    /// Billing mode; `None` uses the provider default.
    pub charge_type: Option<ChargeType>,
    /// Set only for [`ChargeType::Prepaid`].
    pub prepaid: Option<Prepaid>,
    /// Boot disk.
    pub system_disk: SystemDisk,
    /// Network attachment.
    pub vpc: VpcAttachment,
    /// Initial login password.
    pub password: SecureString,
    /// Public network access.
    pub internet: InternetAccess,
}
