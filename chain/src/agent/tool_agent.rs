//! Tool-using agent loop
//!
//! 1. The message is sent to Ollama along with the agent's tools
//! 2. Any tool calls are executed over MCP and their results fed back
//! 3. The loop ends when the model answers without tool calls

use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::parser::parse_tool_call;
use super::tools::{execute_tool_call, mcp_tools_to_direct};
use super::types::{ChatRole, DirectChatRequest, DirectChatResponse, DirectMessage, DirectTool};
use super::Agent;
use crate::llm::ollama_base_url;
use crate::mcp::McpClientPool;

/// Maximum number of tool-calling iterations per message
pub const MAX_ITERATIONS: usize = 10;

/// An agent that can use the tools of its MCP servers
pub struct ToolAgent {
    name: String,
    ollama_url: String,
    http_client: reqwest::Client,
    model: String,
    instruction: String,
    mcp_pool: McpClientPool,
    tools: Option<Vec<DirectTool>>,
    history: Vec<DirectMessage>,
}

impl ToolAgent {
    pub fn new(
        name: impl Into<String>,
        instruction: impl Into<String>,
        ollama_url: &str,
        model: &str,
        mcp_pool: McpClientPool,
    ) -> Self {
        Self {
            name: name.into(),
            ollama_url: ollama_base_url(ollama_url),
            http_client: reqwest::Client::new(),
            model: model.to_string(),
            instruction: instruction.into(),
            mcp_pool,
            tools: None,
            history: Vec::new(),
        }
    }

    /// Tools of the agent's servers, discovered on first use
    async fn tools(&mut self) -> Result<Vec<DirectTool>> {
        if let Some(tools) = &self.tools {
            return Ok(tools.clone());
        }
        let mcp_tools = self.mcp_pool.list_all_tools().await?;
        let tools = mcp_tools_to_direct(&mcp_tools);
        tracing::info!(
            agent = %self.name,
            servers = ?self.mcp_pool.server_names(),
            "Agent has {} tools available",
            tools.len()
        );
        self.tools = Some(tools.clone());
        Ok(tools)
    }

    async fn request(&self, messages: &[DirectMessage], tools: &[DirectTool]) -> Result<DirectChatResponse> {
        let request = DirectChatRequest {
            model: &self.model,
            messages,
            tools,
            stream: false,
        };

        let url = format!("{}/api/chat", self.ollama_url);
        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send HTTP request to Ollama")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Ollama API error {}: {}", status, body);
        }

        let raw_body = response.text().await.context("Failed to get response text")?;
        serde_json::from_str(&raw_body).context("Failed to parse Ollama response")
    }
}

#[async_trait]
impl Agent for ToolAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&mut self, user_message: &str) -> Result<String> {
        let total_start = Instant::now();
        let tools = self.tools().await?;

        let mut messages = vec![DirectMessage::new(ChatRole::System, self.instruction.clone())];
        messages.extend(self.history.iter().cloned());
        messages.push(DirectMessage::new(ChatRole::User, user_message));

        for iteration in 1..=MAX_ITERATIONS {
            tracing::debug!(agent = %self.name, "Agent iteration {}", iteration);

            let ollama_start = Instant::now();
            let assistant_msg = self.request(&messages, &tools).await?.message;
            tracing::info!(
                agent = %self.name,
                elapsed_ms = ollama_start.elapsed().as_millis() as u64,
                tool_calls = assistant_msg.tool_calls.len(),
                "Ollama response"
            );

            let tool_calls = if !assistant_msg.tool_calls.is_empty() {
                assistant_msg.tool_calls
            } else if let Some(parsed) = parse_tool_call(&assistant_msg.content) {
                tracing::info!("Parsed tool call from content: {}", parsed.function.name);
                vec![parsed]
            } else {
                vec![]
            };

            if tool_calls.is_empty() {
                tracing::info!(
                    agent = %self.name,
                    iterations = iteration,
                    total_ms = total_start.elapsed().as_millis() as u64,
                    "Agent responding without tool calls"
                );
                self.history.push(DirectMessage::new(ChatRole::User, user_message));
                self.history
                    .push(DirectMessage::new(ChatRole::Assistant, assistant_msg.content.clone()));
                return Ok(assistant_msg.content);
            }

            messages.push(DirectMessage::tool_request(
                assistant_msg.content,
                tool_calls.clone(),
            ));

            for tool_call in &tool_calls {
                let result = match execute_tool_call(&mut self.mcp_pool, tool_call).await {
                    Ok(r) => r,
                    Err(e) => format!("Error calling tool {}: {:#}", tool_call.function.name, e),
                };
                messages.push(DirectMessage::new(ChatRole::Tool, result));
            }
        }

        tracing::warn!(agent = %self.name, "Agent reached max iterations ({}), stopping", MAX_ITERATIONS);
        anyhow::bail!(
            "Agent '{}' reached maximum iterations ({}) without completing",
            self.name,
            MAX_ITERATIONS
        )
    }

    fn clear_history(&mut self) {
        self.history.clear();
    }
}
