use std::time::Duration;

use stratus_action::ActionError;

use crate::ResourceKind;

/// Errors raised at the cloud seam and by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CloudError {
    /// The `Key=Value;...` provider parameter string is malformed.
    #[error("invalid provider params: {0}")]
    InvalidProviderParams(String),

    /// A describe filter names an unsupported attribute.
    #[error("invalid filter name `{0}`")]
    InvalidFilter(String),

    /// The provider rejected or failed a call.
    #[error("{operation} failed: {message}")]
    Remote {
        /// API operation, e.g. `"RunInstances"`.
        operation: &'static str,
        /// Provider error message.
        message: String,
    },

    /// The provider answered, but the answer is unusable.
    #[error("{operation} returned a malformed response: {message}")]
    MalformedResponse {
        /// API operation.
        operation: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// No resource, or not exactly one, matched the identifier.
    #[error("{kind} `{id}` not found")]
    NotFound {
        /// Resource kind.
        kind: ResourceKind,
        /// Identifier that was described.
        id: String,
    },

    /// More than one resource matched an identifier expected to be unique.
    #[error("{count} {kind} resources match `{id}`")]
    AmbiguousResource {
        /// Resource kind.
        kind: ResourceKind,
        /// Identifier that matched.
        id: String,
        /// Number of matches.
        count: usize,
    },

    /// The desired state was not observed within the wait budget.
    #[error("{kind} `{id}` not {desired} after {elapsed:?} ({polls} polls)")]
    WaitTimeout {
        /// Resource kind.
        kind: ResourceKind,
        /// Identifier of the resource.
        id: String,
        /// Desired state, rendered for humans.
        desired: String,
        /// Time spent waiting.
        elapsed: Duration,
        /// Configured budget.
        timeout: Duration,
        /// Observations taken.
        polls: u32,
    },

    /// The wait was cancelled.
    #[error("cancelled")]
    Cancelled,

    /// The configured wait policy cannot make progress.
    #[error("invalid wait policy: {0}")]
    InvalidWaitPolicy(&'static str),
}

impl CloudError {
    /// Shorthand for [`CloudError::Remote`].
    pub fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Remote {
            operation,
            message: message.into(),
        }
    }
}

impl From<CloudError> for ActionError {
    fn from(err: CloudError) -> Self {
        match err {
            CloudError::InvalidProviderParams(_) | CloudError::InvalidFilter(_) => {
                Self::InvalidParameters(err.to_string())
            }
            CloudError::Remote { .. } | CloudError::MalformedResponse { .. } => {
                Self::RemoteCall(err.to_string())
            }
            CloudError::NotFound { kind, id } => Self::NotFound {
                kind: kind.to_string(),
                id,
            },
            CloudError::AmbiguousResource { kind, id, count } => Self::AmbiguousResource {
                kind: kind.to_string(),
                id,
                count,
            },
            CloudError::WaitTimeout {
                kind,
                id,
                desired,
                elapsed,
                timeout,
                polls,
            } => Self::WaitTimeout {
                kind: kind.to_string(),
                id,
                desired,
                elapsed,
                timeout,
                polls,
            },
            CloudError::Cancelled => Self::Cancelled,
            CloudError::InvalidWaitPolicy(_) => Self::Internal(err.to_string()),
        }
    }
}
