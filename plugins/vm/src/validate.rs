//! Input checks run before any remote call.

use stratus_action::ActionError;
use stratus_cloud::ChargeType;

use crate::model::{BindSecurityGroupsInput, VmInput};

/// Every record must name an existing instance.
pub fn require_instance_ids(inputs: &[VmInput]) -> Result<(), ActionError> {
    if inputs.iter().any(|vm| vm.id.trim().is_empty()) {
        return Err(ActionError::invalid("input instance_id is empty"));
    }
    Ok(())
}

/// Checks a `create` record.
pub fn check_create(vm: &VmInput) -> Result<(), ActionError> {
    if vm.image_id.trim().is_empty() {
        return Err(ActionError::invalid("input image_id is empty"));
    }
    if vm.instance_type.trim().is_empty() {
        return Err(ActionError::invalid("input instance_type is empty"));
    }
    if let Some(ChargeType::Prepaid) = charge_type(vm)?
        && vm.instance_charge_period == 0
    {
        return Err(ActionError::invalid(
            "input instance_charge_period must be positive for PREPAID instances",
        ));
    }
    Ok(())
}

/// The record's billing mode; `None` when left to the provider.
pub fn charge_type(vm: &VmInput) -> Result<Option<ChargeType>, ActionError> {
    match vm.instance_charge_type.trim() {
        "" => Ok(None),
        raw => raw.parse().map(Some).map_err(ActionError::invalid),
    }
}

/// Checks a `bind-security-groups` record.
pub fn check_bind(input: &BindSecurityGroupsInput) -> Result<(), ActionError> {
    if input.provider_params.is_empty() {
        return Err(ActionError::invalid("input provider_params is empty"));
    }
    if input.instance_id.trim().is_empty() {
        return Err(ActionError::invalid("input instance_id is empty"));
    }
    if input.security_groups().is_empty() {
        return Err(ActionError::invalid("input security_group_ids is empty"));
    }
    Ok(())
}
