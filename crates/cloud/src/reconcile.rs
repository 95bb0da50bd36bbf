//! Waiting for a mutated resource to reach its desired state.

use std::fmt;

use stratus_resilience::{Clock, WaitError, WaitPolicy, wait_for};
use tokio_util::sync::CancellationToken;

use crate::{CloudApi, CloudError, Description, Filter, ResourceKind};

/// What a reconciliation waits for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesiredState {
    /// Exactly one resource matches the id and reports this state.
    State(String),
    /// No resource matches the id any more.
    Absent,
}

impl DesiredState {
    /// Shorthand for [`DesiredState::State`].
    pub fn state(state: impl Into<String>) -> Self {
        Self::State(state.into())
    }

    fn is_met_by(&self, description: &Description) -> bool {
        match self {
            Self::State(state) => description
                .observations
                .first()
                .is_some_and(|o| o.state == *state),
            Self::Absent => description.observations.is_empty(),
        }
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(state) => f.write_str(state),
            Self::Absent => f.write_str("absent"),
        }
    }
}

/// Poll `describe` for resource `id` until `desired` holds.
///
/// Returns the describe result of the poll that satisfied the wait. While
/// waiting for a [`DesiredState::State`], a poll that matches zero or
/// several resources fails the wait at once with [`CloudError::NotFound`];
/// only [`DesiredState::Absent`] treats zero matches as success. Describe
/// errors are never retried.
pub async fn wait_for_state(
    api: &dyn CloudApi,
    clock: &dyn Clock,
    policy: WaitPolicy,
    cancel: &CancellationToken,
    kind: ResourceKind,
    id: &str,
    desired: &DesiredState,
) -> Result<Description, CloudError> {
    let filter = Filter::instance_id(id);
    let filter = &filter;

    tracing::debug!(
        %kind,
        resource_id = id,
        desired = %desired,
        timeout_ms = policy.timeout.as_millis() as u64,
        "waiting for desired state"
    );

    let fetch = move || async move {
        let description = api.describe(kind, filter).await?;
        let matches = description.observations.len();
        if matches!(desired, DesiredState::State(_)) && matches != 1 {
            tracing::error!(%kind, resource_id = id, matches, "expected exactly one match");
            return Err(CloudError::NotFound {
                kind,
                id: id.to_owned(),
            });
        }
        if let Some(observation) = description.observations.first() {
            tracing::trace!(resource_id = id, state = %observation.state, "observed");
        }
        Ok(description)
    };

    let outcome = wait_for(clock, policy, cancel, fetch, |d| desired.is_met_by(d)).await;
    if let Err(e) = &outcome {
        tracing::debug!(%kind, resource_id = id, desired = %desired, polls = e.polls(), error = %e, "wait ended");
    }

    match outcome {
        Ok(description) => {
            tracing::info!(%kind, resource_id = id, desired = %desired, "desired state reached");
            Ok(description)
        }
        Err(WaitError::Timeout { elapsed, polls }) => Err(CloudError::WaitTimeout {
            kind,
            id: id.to_owned(),
            desired: desired.to_string(),
            elapsed,
            timeout: policy.timeout,
            polls,
        }),
        Err(WaitError::Probe { source, .. }) => Err(source),
        Err(WaitError::Cancelled { .. }) => Err(CloudError::Cancelled),
        Err(WaitError::InvalidPolicy(reason)) => Err(CloudError::InvalidWaitPolicy(reason)),
        Err(_) => Err(CloudError::InvalidWaitPolicy("unsupported wait outcome")),
    }
}
