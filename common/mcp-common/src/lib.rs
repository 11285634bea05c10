//! MCP Common - Shared utilities for MCP servers
//!
//! - **Initialization**: `serve_stdio!` macro for standardized server startup
//! - **Results**: helpers for building and reading `CallToolResult` text
//! - **Errors**: constructors for MCP error responses
//! - **Embeddable**: [`EmbeddableMcp`] trait for in-process execution
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{serve_stdio, text_success};
//!
//! // In main.rs
//! serve_stdio!(LwfmMcpServer, "lwfm_mcp");
//!
//! // In tool implementations
//! fn my_tool(&self) -> Result<CallToolResult, McpError> {
//!     Ok(text_success(workflow.workflow_id()))
//! }
//! ```

pub mod embeddable;
pub mod error;
pub mod init;
pub mod result;

// Re-export commonly used items at crate root
pub use embeddable::{EmbeddableError, EmbeddableMcp, EmbeddableResult};
pub use error::{internal_error, invalid_params};
pub use init::init_tracing;
pub use result::{result_text, text_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content, Tool},
    ErrorData as McpError,
};

// Re-export async_trait for implementing EmbeddableMcp
pub use async_trait::async_trait;
