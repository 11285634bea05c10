//! Wire types for Ollama's `/api/chat` endpoint with tools

use serde::{Deserialize, Serialize};

use super::parser::ToolCall;

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    /// Result of a tool call fed back to the model
    Tool,
}

#[derive(Debug, Serialize)]
pub struct DirectChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [DirectMessage],
    pub tools: &'a [DirectTool],
    pub stream: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DirectMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl DirectMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: None,
        }
    }

    /// Assistant turn requesting tool calls
    pub fn tool_request(content: String, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content,
            tool_calls: Some(tool_calls),
        }
    }
}

/// Function tool advertised to the model
#[derive(Debug, Serialize, Clone)]
pub struct DirectTool {
    #[serde(rename = "type")]
    pub tool_type: &'static str,
    pub function: DirectToolFunction,
}

#[derive(Debug, Serialize, Clone)]
pub struct DirectToolFunction {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct DirectChatResponse {
    pub message: DirectResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct DirectResponseMessage {
    pub content: String,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}
