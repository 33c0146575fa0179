//! Error types for Tangent.

use thiserror::Error;

/// Primary error type for all Tangent operations.
#[derive(Error, Debug)]
pub enum TangentError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Duplicate tool: '{name}' is already registered")]
    DuplicateTool { name: String },

    #[error("Unknown tool: '{name}'")]
    UnknownTool { name: String },

    #[error("Schema validation failed for tool '{tool_name}': {message}")]
    SchemaValidation { tool_name: String, message: String },

    #[error("Tool execution error: {tool_name} — {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("Tool loop exceeded {limit} iterations without a final answer")]
    MaxIterationsExceeded { limit: usize },

    #[error("Session conflict: a run is already in flight for session '{session_id}'")]
    SessionConflict { session_id: String },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Run canceled")]
    Canceled,
}

impl TangentError {
    /// Construct a tool execution error.
    pub fn tool_execution(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Whether the loop recovers from this error by encoding it as an
    /// error-bearing tool result instead of failing the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownTool { .. }
                | Self::SchemaValidation { .. }
                | Self::ToolExecution { .. }
                | Self::Timeout(_)
        )
    }
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, TangentError>;
