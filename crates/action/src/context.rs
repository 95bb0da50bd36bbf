use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::ActionError;

/// Runtime context provided to every action during execution.
///
/// Constructed by the host once per request. Long-running actions (anything
/// that polls a remote resource) should race their waits against
/// [`cancellation`](Self::cancellation).
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ActionContext {
    /// Identifier of the request being served, for log correlation.
    pub request_id: Uuid,
    /// Cancellation signal, checked cooperatively by actions.
    pub cancellation: CancellationToken,
}

impl ActionContext {
    /// Create a context for the given request.
    pub fn new(request_id: Uuid) -> Self {
        Self {
            request_id,
            cancellation: CancellationToken::new(),
        }
    }

    /// Attach an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Return [`ActionError::Cancelled`] if cancellation has been requested.
    pub fn check_cancelled(&self) -> Result<(), ActionError> {
        if self.is_cancelled() {
            Err(ActionError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for ActionContext {
    fn default() -> Self {
        Self::new(Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_is_not_cancelled() {
        let ctx = ActionContext::default();
        assert!(!ctx.is_cancelled());
        assert!(ctx.check_cancelled().is_ok());
    }

    #[test]
    fn external_token_cancels_context() {
        let token = CancellationToken::new();
        let ctx = ActionContext::new(Uuid::nil()).with_cancellation(token.clone());
        token.cancel();
        assert_eq!(ctx.check_cancelled(), Err(ActionError::Cancelled));
    }
}
