//! MCP Client implementation
//!
//! Each operation spawns the configured server, talks to it over stdio and
//! shuts it down again. Tool discovery results are cached per server.

use std::collections::HashMap;

use anyhow::{Context, Result};
use rmcp::{
    model::{CallToolRequestParam, CallToolResult},
    transport::TokioChildProcess,
    ServiceExt,
};
use serde_json::Value;
use tokio::process::Command;

use crate::config::{McpConfig, McpServerConfig};

/// A tool from an MCP server
#[derive(Debug, Clone)]
pub struct McpTool {
    /// Server this tool belongs to
    pub server: String,
    pub name: String,
    pub description: Option<String>,
    /// Input schema (JSON)
    pub input_schema: Option<Value>,
}

/// Single MCP client connection - static methods for one-shot operations
pub struct McpClient;

impl McpClient {
    fn command(config: &McpServerConfig) -> Command {
        let mut cmd = Command::new(&config.command);
        cmd.args(&config.args);
        for (key, value) in &config.env {
            let expanded = shellexpand::env(value).unwrap_or_else(|_| value.clone().into());
            cmd.env(key, expanded.as_ref());
        }
        cmd
    }

    /// Connect to an MCP server, list its tools, and disconnect
    pub async fn list_tools(name: &str, config: &McpServerConfig) -> Result<Vec<McpTool>> {
        tracing::debug!("Connecting to MCP server: {}", name);

        let transport = TokioChildProcess::new(Self::command(config))
            .with_context(|| format!("Failed to start MCP server '{}'", name))?;
        let service = ().serve(transport).await?;

        let response = service
            .list_tools(Default::default())
            .await
            .context("Failed to list tools")?;

        let tools = response
            .tools
            .into_iter()
            .map(|t| McpTool {
                server: name.to_string(),
                name: t.name.to_string(),
                description: t.description.map(|d| d.to_string()),
                input_schema: serde_json::to_value(&t.input_schema).ok(),
            })
            .collect();

        service.cancel().await?;
        Ok(tools)
    }

    /// Connect to an MCP server and call a tool
    pub async fn call_tool(
        name: &str,
        config: &McpServerConfig,
        tool_name: &str,
        arguments: Option<Value>,
    ) -> Result<CallToolResult> {
        tracing::debug!("Connecting to MCP server: {} to call {}", name, tool_name);

        let transport = TokioChildProcess::new(Self::command(config))
            .with_context(|| format!("Failed to start MCP server '{}'", name))?;
        let service = ().serve(transport).await?;

        let result = service
            .call_tool(CallToolRequestParam {
                name: tool_name.to_string().into(),
                arguments: arguments.and_then(|v| v.as_object().cloned()),
                task: None,
            })
            .await
            .context("Failed to call tool")?;

        service.cancel().await?;
        Ok(result)
    }
}

/// MCP server access for one agent, with tool caching
pub struct McpClientPool {
    config: McpConfig,
    tools_cache: HashMap<String, Vec<McpTool>>,
}

impl McpClientPool {
    pub fn new(config: McpConfig) -> Self {
        Self {
            config,
            tools_cache: HashMap::new(),
        }
    }

    /// Configured server names, sorted
    pub fn server_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.config.mcp_servers.keys().cloned().collect();
        names.sort();
        names
    }

    /// List tools from a specific server (with caching)
    pub async fn list_tools_from(&mut self, name: &str) -> Result<Vec<McpTool>> {
        if let Some(tools) = self.tools_cache.get(name) {
            return Ok(tools.clone());
        }

        let server_config = self
            .config
            .mcp_servers
            .get(name)
            .with_context(|| format!("MCP server '{}' not found in config", name))?;
        let tools = McpClient::list_tools(name, server_config).await?;

        self.tools_cache.insert(name.to_string(), tools.clone());
        tracing::info!("Server '{}': {} tools (cached)", name, tools.len());
        Ok(tools)
    }

    /// List tools from every configured server; an unreachable server is an error
    pub async fn list_all_tools(&mut self) -> Result<Vec<McpTool>> {
        let mut all_tools = Vec::new();
        for name in self.server_names() {
            all_tools.extend(self.list_tools_from(&name).await?);
        }
        Ok(all_tools)
    }

    /// Call a tool by name on whichever configured server provides it
    pub async fn call_tool(&mut self, tool_name: &str, arguments: Option<Value>) -> Result<CallToolResult> {
        let mut server_name = None;
        for name in self.server_names() {
            let tools = self.list_tools_from(&name).await?;
            if tools.iter().any(|t| t.name == tool_name) {
                server_name = Some(name);
                break;
            }
        }
        let server_name =
            server_name.with_context(|| format!("Tool '{}' not found in any MCP server", tool_name))?;

        let server_config = self
            .config
            .mcp_servers
            .get(&server_name)
            .with_context(|| format!("MCP server '{}' not found", server_name))?;

        McpClient::call_tool(&server_name, server_config, tool_name, arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::McpServerConfig;

    fn config(names: &[&str]) -> McpConfig {
        McpConfig {
            mcp_servers: names
                .iter()
                .map(|n| {
                    (
                        n.to_string(),
                        McpServerConfig {
                            command: "/nonexistent/mcp-server".to_string(),
                            args: Vec::new(),
                            env: HashMap::new(),
                        },
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_server_names_sorted() {
        let pool = McpClientPool::new(config(&["windows-cli", "fetch", "filesystem"]));
        assert_eq!(pool.server_names(), vec!["fetch", "filesystem", "windows-cli"]);
    }

    #[tokio::test]
    async fn test_unknown_server() {
        let mut pool = McpClientPool::new(config(&["fetch"]));
        let err = pool.list_tools_from("filesystem").await.unwrap_err();
        assert!(err.to_string().contains("not found in config"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        let mut pool = McpClientPool::new(config(&["fetch"]));
        assert!(pool.list_all_tools().await.is_err());
        assert!(pool.call_tool("fetch", None).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_pool_has_no_tools() {
        let mut pool = McpClientPool::new(McpConfig::default());
        assert!(pool.list_all_tools().await.unwrap().is_empty());

        let err = pool.call_tool("fetch", None).await.unwrap_err();
        assert!(err.to_string().contains("not found in any MCP server"));
    }
}
