//! Agents: a named unit that answers one message at a time
//!
//! Two kinds exist:
//! - [`LlmAgent`] chats with an instruction-primed model and has no tools
//! - [`ToolAgent`] runs a bounded tool-calling loop against its MCP servers

use anyhow::Result;
use async_trait::async_trait;

use crate::llm::{Llm, Message};

mod parser;
mod tool_agent;
mod tools;
mod types;

pub use parser::{parse_tool_call, ToolCall, ToolCallFunction};
pub use tool_agent::{ToolAgent, MAX_ITERATIONS};

/// Instruction for agents declared without one
pub const DEFAULT_INSTRUCTION: &str = "You are a helpful agent.";

/// A conversational agent
#[async_trait]
pub trait Agent: Send {
    /// Agent name as declared in the registry
    fn name(&self) -> &str;

    /// Send one message and return the agent's reply
    async fn send(&mut self, message: &str) -> Result<String>;

    /// Forget the conversation so far, keeping the instruction
    fn clear_history(&mut self);
}

/// Agent backed by a plain LLM chat with history
pub struct LlmAgent {
    name: String,
    llm: Box<dyn Llm>,
    history: Vec<Message>,
}

impl LlmAgent {
    pub fn new(name: impl Into<String>, instruction: &str, llm: Box<dyn Llm>) -> Self {
        Self {
            name: name.into(),
            llm,
            history: vec![Message::system(instruction)],
        }
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }
}

#[async_trait]
impl Agent for LlmAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&mut self, message: &str) -> Result<String> {
        tracing::debug!(agent = %self.name, model = self.llm.model(), "Sending message");
        self.llm.chat_with_history(&mut self.history, message).await
    }

    fn clear_history(&mut self) {
        self.history.truncate(1);
    }
}
