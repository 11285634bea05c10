//! Error types for agent and chain declarations

use thiserror::Error;

/// Errors raised while validating declarations or dispatching to a target
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("Agent '{0}' is declared more than once")]
    DuplicateAgent(String),

    #[error("Chain '{0}' is declared more than once")]
    DuplicateChain(String),

    #[error("Chain '{0}' has the same name as an agent")]
    NameCollision(String),

    #[error("Chain '{0}' has no agents")]
    EmptyChain(String),

    #[error("Chain '{chain}' references unknown agent '{agent}'")]
    UnknownAgent { chain: String, agent: String },

    #[error("Agent '{agent}' needs MCP server '{server}' which is not in .mcp.json")]
    MissingServer { agent: String, server: String },

    #[error("No agent or chain named '{0}'")]
    UnknownTarget(String),
}

pub type ChainResult<T> = Result<T, ChainError>;
