use crate::{CloudApi, CloudError, Filter, Observation, ResourceKind};

/// A resource that already exists under the requested id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Existing {
    /// Its current observation.
    pub observation: Observation,
    /// Request id of the describe that found it.
    pub request_id: String,
}

/// Idempotent-create guard: look up `id` before creating anything.
///
/// - empty `id`: `Ok(None)` without calling the provider
/// - zero matches: `Ok(None)`, the caller proceeds to create
/// - one match: `Ok(Some(..))`, the caller must not create
/// - several matches: [`CloudError::AmbiguousResource`]
pub async fn find_existing(
    api: &dyn CloudApi,
    kind: ResourceKind,
    id: &str,
) -> Result<Option<Existing>, CloudError> {
    if id.is_empty() {
        return Ok(None);
    }

    let mut description = api.describe(kind, &Filter::instance_id(id)).await?;
    match description.observations.len() {
        0 => {
            tracing::debug!(%kind, resource_id = id, "no existing resource");
            Ok(None)
        }
        1 => {
            let observation = description.observations.remove(0);
            tracing::info!(%kind, resource_id = id, state = %observation.state, "resource already exists");
            Ok(Some(Existing {
                observation,
                request_id: description.request_id,
            }))
        }
        count => {
            tracing::error!(%kind, resource_id = id, count, "identifier matches several resources");
            Err(CloudError::AmbiguousResource {
                kind,
                id: id.to_owned(),
                count,
            })
        }
    }
}
