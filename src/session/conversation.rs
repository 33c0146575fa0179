//! Append-only conversation log for one session.

use serde::{Deserialize, Serialize};

use crate::types::{ContentPart, Message};

/// Ordered, append-only message log for exactly one session.
///
/// Sequence order is the causal order of the conversation; nothing edits
/// or reorders entries after append.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, returning the new length.
    pub fn append(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len()
    }

    /// Append a whole batch in order.
    pub fn extend(&mut self, batch: impl IntoIterator<Item = Message>) -> usize {
        self.messages.extend(batch);
        self.messages.len()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Text of the last assistant message, if any.
    pub fn last_assistant_text(&self) -> Option<String> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == crate::types::Role::Assistant)
            .map(|m| m.text())
    }

    /// Verify the referential invariant: every tool result links back to
    /// exactly one tool call emitted earlier in this log.
    ///
    /// Returns the ids of orphan or duplicated results.
    pub fn orphan_tool_results(&self) -> Vec<String> {
        let mut seen_calls: Vec<&str> = Vec::new();
        let mut orphans = Vec::new();
        for message in &self.messages {
            for part in &message.content {
                match part {
                    ContentPart::ToolCall(tc) => seen_calls.push(tc.id.as_str()),
                    ContentPart::ToolResult(tr) => {
                        let matches = seen_calls
                            .iter()
                            .filter(|id| **id == tr.tool_call_id)
                            .count();
                        if matches != 1 {
                            orphans.push(tr.tool_call_id.clone());
                        }
                    }
                    ContentPart::Text { .. } => {}
                }
            }
        }
        orphans
    }
}
