use std::fmt;
use std::time::Duration;

/// Error type for all action stages.
///
/// Every variant is surfaced to the caller as-is; none of them is retried by
/// the host. [`WaitTimeout`](Self::WaitTimeout) is kept apart from
/// [`RemoteCall`](Self::RemoteCall) so callers can tell "probably still in
/// progress" from "definitely broken".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ActionError {
    /// A remote resource (or other named entity) does not exist.
    #[error("{kind} `{id}` not found")]
    NotFound {
        /// What was looked up (e.g. `"instance"`).
        kind: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// Structural or semantic validation failed.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The opaque payload could not be decoded into the typed input.
    #[error("decode parameters: {0}")]
    Decode(String),

    /// The cloud API call itself failed (network, auth, quota).
    #[error("remote call failed: {0}")]
    RemoteCall(String),

    /// The resource did not reach the desired state within the budget.
    #[error(
        "wait timeout: {kind} `{id}` not {desired} after {elapsed:?} ({polls} polls, budget {timeout:?})"
    )]
    WaitTimeout {
        /// Resource kind being waited on.
        kind: String,
        /// Identifier of the resource.
        id: String,
        /// Human-readable desired state.
        desired: String,
        /// Time spent waiting.
        elapsed: Duration,
        /// Configured budget.
        timeout: Duration,
        /// Number of observations taken.
        polls: u32,
    },

    /// More than one remote resource matched an identifier expected to be unique.
    #[error("ambiguous resource: {count} {kind} resources match `{id}`")]
    AmbiguousResource {
        /// Resource kind.
        kind: String,
        /// The identifier that matched more than once.
        id: String,
        /// Number of matches.
        count: usize,
    },

    /// Execution cancelled via the context's cancellation token.
    #[error("cancelled")]
    Cancelled,

    /// Host-side failure unrelated to the request (serialization, panics).
    #[error("internal: {0}")]
    Internal(String),
}

/// Coarse classification of an [`ActionError`], used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ActionError::NotFound`].
    NotFound,
    /// See [`ActionError::InvalidParameters`].
    InvalidParameters,
    /// See [`ActionError::Decode`].
    Decode,
    /// See [`ActionError::RemoteCall`].
    RemoteCall,
    /// See [`ActionError::WaitTimeout`].
    WaitTimeout,
    /// See [`ActionError::AmbiguousResource`].
    AmbiguousResource,
    /// See [`ActionError::Cancelled`].
    Cancelled,
    /// See [`ActionError::Internal`].
    Internal,
}

impl ErrorKind {
    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidParameters => "invalid_parameters",
            Self::Decode => "decode",
            Self::RemoteCall => "remote_call",
            Self::WaitTimeout => "wait_timeout",
            Self::AmbiguousResource => "ambiguous_resource",
            Self::Cancelled => "cancelled",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ActionError {
    /// Create a not-found error.
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Create a validation error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameters(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a remote-call error.
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::RemoteCall(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidParameters(_) => ErrorKind::InvalidParameters,
            Self::Decode(_) => ErrorKind::Decode,
            Self::RemoteCall(_) => ErrorKind::RemoteCall,
            Self::WaitTimeout { .. } => ErrorKind::WaitTimeout,
            Self::AmbiguousResource { .. } => ErrorKind::AmbiguousResource,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Returns `true` when the remote operation may still complete on its own.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::WaitTimeout { .. })
    }

    /// Returns `true` for errors raised before any remote call was made.
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::InvalidParameters(_) | Self::Decode(_))
    }
}
