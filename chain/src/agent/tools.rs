//! Tool-related utilities for the tool agent

use anyhow::{Context, Result};
use mcp_common::result_text;

use super::parser::ToolCall;
use super::types::{DirectTool, DirectToolFunction};
use crate::mcp::{McpClientPool, McpTool};

/// Clean up a JSON schema for Ollama compatibility
/// Removes $schema, title and additionalProperties, which Ollama rejects
pub fn clean_schema_for_ollama(schema: &serde_json::Value) -> serde_json::Value {
    match schema {
        serde_json::Value::Object(obj) => serde_json::Value::Object(
            obj.iter()
                .filter(|(key, _)| !matches!(key.as_str(), "$schema" | "title" | "additionalProperties"))
                .map(|(key, value)| (key.clone(), clean_schema_for_ollama(value)))
                .collect(),
        ),
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(clean_schema_for_ollama).collect())
        }
        other => other.clone(),
    }
}

/// Convert MCP tools to direct API format
pub fn mcp_tools_to_direct(tools: &[McpTool]) -> Vec<DirectTool> {
    tools
        .iter()
        .map(|tool| {
            let parameters = tool
                .input_schema
                .as_ref()
                .map(clean_schema_for_ollama)
                .unwrap_or_else(|| serde_json::json!({"type": "object", "properties": {}}));

            DirectTool {
                tool_type: "function",
                function: DirectToolFunction {
                    name: tool.name.clone(),
                    description: tool.description.clone().unwrap_or_default(),
                    parameters,
                },
            }
        })
        .collect()
}

/// Execute a tool call via MCP and return the text result
pub async fn execute_tool_call(mcp_pool: &mut McpClientPool, tool_call: &ToolCall) -> Result<String> {
    let name = &tool_call.function.name;
    let args = &tool_call.function.arguments;

    tracing::info!("Executing tool: {} with args: {}", name, args);

    let result = mcp_pool
        .call_tool(name, Some(args.clone()))
        .await
        .with_context(|| format!("Failed to call tool: {}", name))?;

    let output = result_text(&result);
    if result.is_error == Some(true) {
        anyhow::bail!("{}", output);
    }

    tracing::debug!("Tool {} returned {} bytes", name, output.len());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_schema() {
        let schema = serde_json::json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "title": "FetchParams",
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "url": { "type": "string", "title": "Url" }
            },
            "required": ["url"]
        });

        let cleaned = clean_schema_for_ollama(&schema);
        assert_eq!(
            cleaned,
            serde_json::json!({
                "type": "object",
                "properties": { "url": { "type": "string" } },
                "required": ["url"]
            })
        );
    }

    #[test]
    fn test_tool_conversion() {
        let tools = vec![
            McpTool {
                server: "fetch".to_string(),
                name: "fetch".to_string(),
                description: Some("Fetch a URL".to_string()),
                input_schema: Some(serde_json::json!({
                    "type": "object",
                    "properties": { "url": { "type": "string" } }
                })),
            },
            McpTool {
                server: "filesystem".to_string(),
                name: "list_allowed_directories".to_string(),
                description: None,
                input_schema: None,
            },
        ];

        let direct = mcp_tools_to_direct(&tools);

        assert_eq!(direct.len(), 2);
        assert_eq!(direct[0].tool_type, "function");
        assert_eq!(direct[0].function.name, "fetch");
        assert_eq!(direct[0].function.description, "Fetch a URL");
        assert_eq!(direct[1].function.description, "");
        assert_eq!(direct[1].function.parameters["type"], "object");
    }
}
