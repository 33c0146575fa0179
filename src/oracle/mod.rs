//! Decision oracle seam.
//!
//! The oracle is the language-model component, treated as an opaque and
//! potentially slow remote collaborator. It is stateless per call: all
//! context arrives through the message log.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Message, ToolCall};

/// Tool schema as published to the oracle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema for the tool's arguments.
    pub parameters: serde_json::Value,
}

/// Outcome of one oracle consultation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Decision {
    /// Terminal answer for the invocation.
    Final { text: String },
    /// One or more tool invocations, to be dispatched in the order given.
    ToolCalls {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        preamble: Option<String>,
        calls: Vec<ToolCall>,
    },
}

impl Decision {
    pub fn final_answer(text: impl Into<String>) -> Self {
        Self::Final { text: text.into() }
    }

    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        Self::ToolCalls {
            preamble: None,
            calls,
        }
    }
}

/// The decision seam between the loop and the language model.
#[async_trait]
pub trait DecisionOracle: Send + Sync {
    /// Given the full message log and the published tool schemas, return
    /// either a final answer or a batch of tool calls.
    async fn decide(&self, log: &[Message], tools: &[ToolDefinition]) -> Result<Decision>;
}
