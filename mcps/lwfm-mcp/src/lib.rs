//! lwfm MCP Library
//!
//! Wraps lwfm workflow programming as MCP tooling for an agentic
//! environment. The server advertises itself as `lwfm-server` with a fixed
//! set of instructions, two tools and one prompt:
//!
//! - `initiate_workflow` - create a workflow and return its id
//! - `run_workflow` - submit a job to the Local site and return its initial status
//! - `end_to_end_workflow` - prompt walking the agent through the whole procedure
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use lwfm_mcp::LwfmMcpServer;
//! use mcp_common::EmbeddableMcp;
//!
//! let server = LwfmMcpServer::load()?;
//! let id = server
//!     .call_tool("initiate_workflow", serde_json::json!({ "name": "Q1" }))
//!     .await?;
//! ```

pub mod config;
pub mod handlers;
pub mod params;
pub mod prompts;
pub mod server;

pub use config::Config;
pub use server::{LwfmMcpServer, SERVER_NAME};

pub use params::*;
