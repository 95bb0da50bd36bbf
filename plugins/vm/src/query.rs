use stratus_action::ActionError;
use stratus_cloud::{Filter, Observation, ProviderParams, ResourceKind};

use crate::VmRuntime;

/// List the instances matching `filter`, for callers that look instances
/// up by id or private address outside the action pipeline.
pub async fn query_instances(
    runtime: &VmRuntime,
    params: &ProviderParams,
    filter: &Filter,
) -> Result<Vec<Observation>, ActionError> {
    let api = runtime.connect(params)?;
    let description = api.describe(ResourceKind::Instance, filter).await?;
    tracing::debug!(
        filter = %filter.name,
        matches = description.observations.len(),
        request_id = %description.request_id,
        "instances queried"
    );
    Ok(description.observations)
}
