//! LLM abstraction layer

mod ollama;

pub use ollama::{ollama_base_url, OllamaClient};

use anyhow::Result;
use async_trait::async_trait;

/// Message in a conversation
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Trait for LLM backends
#[async_trait]
pub trait Llm: Send + Sync {
    /// Chat with conversation history; the exchange is appended to `history`
    async fn chat_with_history(&self, history: &mut Vec<Message>, message: &str) -> Result<String>;

    /// Get the model name
    fn model(&self) -> &str;
}
