//! Result helpers for MCP tool responses

use rmcp::model::{CallToolResult, Content, RawContent};

/// Create a successful plain text response
///
/// ```rust,ignore
/// use mcp_common::text_success;
///
/// fn my_tool(&self) -> Result<CallToolResult, McpError> {
///     Ok(text_success(status.get_status()))
/// }
/// ```
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Concatenate the text parts of a tool result, one per line
///
/// Non-text parts (images, resources) are rendered with their debug form so
/// the caller still sees that something came back.
pub fn result_text(result: &CallToolResult) -> String {
    let mut output = String::new();
    for content in &result.content {
        if !output.is_empty() {
            output.push('\n');
        }
        match &content.raw {
            RawContent::Text(text) => output.push_str(&text.text),
            other => output.push_str(&format!("{:?}", other)),
        }
    }
    output
}
