//! MCP client support for tool agents

mod client;

pub use client::{McpClient, McpClientPool, McpTool};
