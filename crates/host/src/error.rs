//! Host error types.

use stratus_action::ActionError;
use stratus_log::LogError;
use stratus_plugin::PluginError;

/// Errors from the host layer.
///
/// Inside [`Host::process`](crate::Host::process) every variant ends up as
/// the message of a failure response; only configuration and logging
/// errors reach callers as `Err`.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HostError {
    /// Plugin or action lookup failed.
    #[error(transparent)]
    Plugin(#[from] PluginError),

    /// A pipeline stage of the action failed.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// The action panicked.
    #[error("action panicked: {0}")]
    Panicked(String),

    /// Configuration could not be loaded.
    #[error("configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// The logger could not be installed.
    #[error(transparent)]
    Log(#[from] LogError),
}

impl From<figment::Error> for HostError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl HostError {
    /// Stable snake_case name of the failure, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Plugin(PluginError::NotFound(_)) => "plugin_not_found",
            Self::Plugin(PluginError::ActionNotFound { .. }) => "action_not_found",
            Self::Plugin(_) => "plugin",
            Self::Action(e) => e.kind().as_str(),
            Self::Panicked(_) => "panicked",
            Self::Config(_) => "config",
            Self::Log(_) => "log",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_errors_keep_their_message() {
        let err = HostError::from(PluginError::NotFound("storage".into()));
        assert_eq!(err.to_string(), "plugin `storage` not found");
        assert_eq!(err.kind(), "plugin_not_found");
    }

    #[test]
    fn action_errors_keep_their_message() {
        let err = HostError::from(ActionError::invalid("input image_id is empty"));
        assert_eq!(err.to_string(), "invalid parameters: input image_id is empty");
        assert_eq!(err.kind(), "invalid_parameters");
    }

    #[test]
    fn panic_display() {
        let err = HostError::Panicked("boom".into());
        assert_eq!(err.to_string(), "action panicked: boom");
    }
}
