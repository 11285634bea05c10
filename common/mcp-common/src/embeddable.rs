//! Embeddable MCP trait for in-process execution
//!
//! [`EmbeddableMcp`] lets a host (or a test) call an MCP server's tools
//! directly, without spawning a subprocess or opening a transport.
//!
//! ```rust,ignore
//! use mcp_common::EmbeddableMcp;
//! use lwfm_mcp::LwfmMcpServer;
//!
//! let server = LwfmMcpServer::load()?;
//! let result = server
//!     .call_tool("initiate_workflow", serde_json::json!({ "name": "Q1" }))
//!     .await?;
//! ```

use async_trait::async_trait;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Error type for embeddable MCP operations
#[derive(Debug, thiserror::Error)]
pub enum EmbeddableError {
    /// Tool was not found in the server
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Arguments did not deserialize into the tool's parameter type
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// The tool ran and reported an MCP error
    #[error("mcp error: {0}")]
    McpError(String),
}

impl From<rmcp::ErrorData> for EmbeddableError {
    fn from(err: rmcp::ErrorData) -> Self {
        EmbeddableError::McpError(err.message.to_string())
    }
}

/// Result type for embeddable MCP operations
pub type EmbeddableResult<T> = Result<T, EmbeddableError>;

/// Trait for MCP servers that can be executed in-process
///
/// Servers built on rmcp's `#[tool_router]` implement this by listing their
/// router's tools and dispatching `call_tool` by name to the same handler
/// methods the router uses.
#[async_trait]
pub trait EmbeddableMcp: Send + Sync {
    /// Server name, as advertised in the MCP handshake
    fn server_name(&self) -> &str;

    /// All available tools with their input schemas
    fn list_tools(&self) -> Vec<Tool>;

    /// Execute a tool by name with a JSON object of arguments
    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult>;

    /// Optional description of the server
    fn server_description(&self) -> Option<&str> {
        None
    }
}
