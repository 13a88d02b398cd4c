//! Shared conversation message and tool types.
//!
//! These types are the vocabulary spoken between the agent, the generation
//! gateway, and the retrieval tool. Each message variant carries only the
//! fields valid for its role.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ConversationMessage {
    /// Instructions for the model.
    System { content: String },

    /// A message from the user.
    User { content: String },

    /// A plain assistant reply.
    Assistant { content: String },

    /// An assistant turn that requested a tool invocation.
    AssistantToolCall { name: String, arguments: Value },

    /// The output of an invoked tool, fed back to the model.
    ToolResult { name: String, content: String },
}

impl ConversationMessage {
    /// Role label for this message.
    pub fn role(&self) -> &'static str {
        match self {
            ConversationMessage::System { .. } => "system",
            ConversationMessage::User { .. } => "user",
            ConversationMessage::Assistant { .. } => "assistant",
            ConversationMessage::AssistantToolCall { .. } => "assistant",
            ConversationMessage::ToolResult { .. } => "tool",
        }
    }

    /// Text content of this message, if the variant carries any.
    pub fn content(&self) -> Option<&str> {
        match self {
            ConversationMessage::System { content }
            | ConversationMessage::User { content }
            | ConversationMessage::Assistant { content }
            | ConversationMessage::ToolResult { content, .. } => Some(content),
            ConversationMessage::AssistantToolCall { .. } => None,
        }
    }
}

/// Render prior conversation turns as plain text for prompt interpolation.
pub fn format_history(history: &[ConversationMessage]) -> String {
    history
        .iter()
        .filter_map(|msg| msg.content().map(|c| format!("{}: {}", msg.role(), c)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A structured tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON arguments for the tool.
    pub arguments: Value,
}

/// A tool made available to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name.
    pub name: String,
    /// What the tool does, shown to the model.
    pub description: String,
    /// JSON Schema describing the tool parameters.
    pub parameters: Value,
}
