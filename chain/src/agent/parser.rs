//! Tool call types and content fallback parsing
//!
//! Models normally return tool calls in the `tool_calls` array. Some emit the
//! call as JSON in the message content instead, in the OpenAI-compatible
//! `{"name": "...", "arguments": {...}}` shape, sometimes inside a code fence.

use serde::{Deserialize, Serialize};

/// A tool call parsed from LLM response
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolCall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub function: ToolCallFunction,
}

/// The function details within a tool call
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolCallFunction {
    #[serde(default)]
    pub index: Option<i32>,
    pub name: String,
    pub arguments: serde_json::Value,
}

#[derive(Deserialize)]
struct StandardFormat {
    name: String,
    #[serde(alias = "parameters")]
    arguments: serde_json::Value,
}

/// Try to read a tool call out of message content
pub fn parse_tool_call(content: &str) -> Option<ToolCall> {
    let content = strip_code_fence(content.trim());
    let parsed: StandardFormat = serde_json::from_str(content).ok()?;

    Some(ToolCall {
        id: None,
        function: ToolCallFunction {
            index: None,
            name: parsed.name,
            arguments: parsed.arguments,
        },
    })
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let content = r#"{"name": "fetch", "arguments": {"url": "https://example.com"}}"#;

        let tool_call = parse_tool_call(content).unwrap();
        assert_eq!(tool_call.function.name, "fetch");
        assert_eq!(tool_call.function.arguments["url"], "https://example.com");
    }

    #[test]
    fn test_parse_parameters_alias_in_fence() {
        let content = "```json\n{\"name\": \"read_file\", \"parameters\": {\"path\": \"a.txt\"}}\n```";

        let tool_call = parse_tool_call(content).unwrap();
        assert_eq!(tool_call.function.name, "read_file");
        assert_eq!(tool_call.function.arguments["path"], "a.txt");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_tool_call(r#"{"arguments": {}}"#).is_none());
        assert!(parse_tool_call(r#"{"tool": "test"}"#).is_none());
        assert!(parse_tool_call("The page describes a quantum workflow.").is_none());
        assert!(parse_tool_call("").is_none());
    }
}
