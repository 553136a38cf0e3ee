//! Custom error types for Frameact
//!
//! Provides a unified error handling system across all modules. The first
//! three variants are the per-step failure taxonomy: each maps to a `Failed`
//! log entry and never aborts a run.

use thiserror::Error;

/// Main error type for Frameact operations
#[derive(Error, Debug)]
pub enum FrameactError {
    /// No candidate in the selector fallback chain matched
    #[error("no selector candidate matched: {0}")]
    Resolution(String),

    /// Action kind is not valid for the resolved element's nature
    #[error("incompatible action: {0}")]
    IncompatibleAction(String),

    /// The underlying action call itself raised
    #[error("execution fault: {0}")]
    ExecutionFault(String),

    /// Direct inspection denied by the frame boundary. Internal signal that
    /// triggers the messaging fallback; never surfaced to the caller.
    #[error("frame boundary denied direct access: {0}")]
    ChannelPermission(String),

    /// Posting a message into the frame failed
    #[error("dispatch error: {0}")]
    Dispatch(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for Frameact operations
pub type Result<T> = std::result::Result<T, FrameactError>;

impl FrameactError {
    /// Create a resolution failure for a fallback chain
    pub fn resolution(target_spec: impl Into<String>) -> Self {
        Self::Resolution(target_spec.into())
    }

    /// Create an incompatible-action error
    pub fn incompatible(msg: impl Into<String>) -> Self {
        Self::IncompatibleAction(msg.into())
    }

    /// Create an execution fault
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::ExecutionFault(msg.into())
    }

    /// Create a permission fault for a denied frame boundary
    pub fn permission(msg: impl Into<String>) -> Self {
        Self::ChannelPermission(msg.into())
    }

    /// Create a dispatch error
    pub fn dispatch(msg: impl Into<String>) -> Self {
        Self::Dispatch(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error is the internal fallback trigger rather than a
    /// step outcome
    pub fn is_permission_fault(&self) -> bool {
        matches!(self, Self::ChannelPermission(_))
    }
}
