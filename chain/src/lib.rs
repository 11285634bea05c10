//! Agent Chaining
//!
//! Named Ollama agents, optionally bound to MCP servers, composed into
//! linear chains and driven from an interactive session.

pub mod agent;
pub mod app;
pub mod chain;
pub mod config;
pub mod error;
pub mod llm;
pub mod mcp;
pub mod registry;
pub mod repl;

pub use agent::{Agent, LlmAgent, ToolAgent};
pub use app::{AgentApp, AgentFactory, OllamaAgentFactory};
pub use chain::{Chain, ChainRun, StepResult};
pub use config::{ChainFileConfig, McpConfig};
pub use error::{ChainError, ChainResult};
pub use registry::{AgentRegistry, AgentSpec, ChainSpec, APP_NAME, DEFAULT_TARGET};
pub use repl::Repl;
