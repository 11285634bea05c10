//! Ollama LLM implementation

use anyhow::Result;
use async_trait::async_trait;
use ollama_rs::{
    generation::chat::{request::ChatMessageRequest, ChatMessage},
    Ollama,
};

use super::{Llm, Message, Role};

const DEFAULT_SCHEME: &str = "http";
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 11434;

/// Scheme, host and port of an Ollama endpoint
#[derive(Debug, Clone, PartialEq)]
struct Endpoint {
    scheme: String,
    host: String,
    port: u16,
}

impl Endpoint {
    /// Parse an Ollama URL, falling back to the local default.
    ///
    /// An explicit port always wins. Plain `http` without a port means the
    /// Ollama port; other schemes use their well-known port (443 for https).
    fn parse(url: &str) -> Self {
        match url::Url::parse(url) {
            Ok(url) => {
                let port = match url.port() {
                    Some(port) => port,
                    None if url.scheme() == DEFAULT_SCHEME => DEFAULT_PORT,
                    None => url.port_or_known_default().unwrap_or(DEFAULT_PORT),
                };
                Self {
                    scheme: url.scheme().to_string(),
                    host: url.host_str().unwrap_or(DEFAULT_HOST).to_string(),
                    port,
                }
            }
            Err(e) => {
                tracing::warn!("Invalid Ollama URL '{}' ({}), using default", url, e);
                Self {
                    scheme: DEFAULT_SCHEME.to_string(),
                    host: DEFAULT_HOST.to_string(),
                    port: DEFAULT_PORT,
                }
            }
        }
    }

    fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

/// Normalized `scheme://host:port` base for direct API calls
pub fn ollama_base_url(url: &str) -> String {
    let endpoint = Endpoint::parse(url);
    format!("{}:{}", endpoint.origin(), endpoint.port)
}

/// Ollama client wrapper
pub struct OllamaClient {
    client: Ollama,
    model: String,
}

impl OllamaClient {
    pub fn new(url: &str, model: &str) -> Self {
        let endpoint = Endpoint::parse(url);
        Self {
            client: Ollama::new(endpoint.origin(), endpoint.port),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl Llm for OllamaClient {
    async fn chat_with_history(&self, history: &mut Vec<Message>, message: &str) -> Result<String> {
        history.push(Message {
            role: Role::User,
            content: message.to_string(),
        });

        let messages: Vec<ChatMessage> = history
            .iter()
            .map(|m| match m.role {
                Role::System => ChatMessage::system(m.content.clone()),
                Role::User => ChatMessage::user(m.content.clone()),
                Role::Assistant => ChatMessage::assistant(m.content.clone()),
            })
            .collect();

        let request = ChatMessageRequest::new(self.model.clone(), messages);
        let response = match self.client.send_chat_messages(request).await {
            Ok(response) => response,
            Err(e) => {
                // Keep history consistent with what the model has seen
                history.pop();
                return Err(e.into());
            }
        };

        history.push(Message {
            role: Role::Assistant,
            content: response.message.content.clone(),
        });

        Ok(response.message.content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
