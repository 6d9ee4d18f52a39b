//! Fatal errors raised during a parse run.
//!
//! Ordinary parse failure is not an error: it is reported as a value in
//! the parsing result so the caller can inspect the diagnostic. Only
//! conditions that make the run meaningless surface as `RuntimeError`.

/// Failure signalled by a user action.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ActionError {
    message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Fatal conditions during matcher execution.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Too many nested rule invocations.
    #[error("recursion limit exceeded after {0} nested rule invocations")]
    RecursionLimitExceeded(u32),

    /// A user action returned an error.
    #[error("action failed at {path}")]
    ActionFailed {
        /// Active matcher labels at the failure, `/`-joined.
        path: String,
        #[source]
        source: ActionError,
    },

    /// A proxy matcher was executed without a resolved target. The
    /// builder rejects these at `finish`, so reaching one here means the
    /// grammar was corrupted.
    #[error("proxy matcher reached at runtime without a resolved target")]
    UnresolvedProxy,
}
