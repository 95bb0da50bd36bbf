/// Logging setup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LogError {
    /// The level filter could not be parsed
    #[error("invalid filter '{filter}': {reason}")]
    Filter {
        /// The rejected filter string
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber is already installed
    #[error("failed to install global subscriber: {0}")]
    Init(String),
}
