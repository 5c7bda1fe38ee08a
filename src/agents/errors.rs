use thiserror::Error;

/// Errors that can occur in the state-sync layer
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Invalid task: {0}")]
    InvalidTask(String),

    #[error("Duplicate task id: {0}")]
    DuplicateTask(String),

    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("No approval is pending")]
    NoPendingApproval,

    #[error("Approval submission failed: {0}")]
    ApprovalSubmissionFailed(String),

    #[error("Event channel closed")]
    ChannelClosed,

    #[error("Event stream error: {0}")]
    Stream(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type SyncResult<T> = Result<T, SyncError>;
