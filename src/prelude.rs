//! Common re-exports.

pub use crate::agent_loop::{
    RunEvent, RunHandle, RunOutcome, RunRequest, RunStatus, SessionRunner,
};
pub use crate::config::TangentConfig;
pub use crate::error::{Result, TangentError};
pub use crate::oracle::{Decision, DecisionOracle, ToolDefinition};
pub use crate::session::{Conversation, InMemorySessionStore, SessionStore};
pub use crate::tools::{FunctionTool, Tool, ToolArguments, ToolParameters, ToolRegistry};
pub use crate::types::{ContentPart, Message, Role, ToolCall, ToolResult};
