//! lwfm MCP Server
//!
//! Exposes lwfm workflow tooling to an LLM-driven agent over stdio:
//! - `initiate_workflow` / `run_workflow` tools
//! - `end_to_end_workflow` prompt

use lwfm_mcp::LwfmMcpServer;

mcp_common::serve_stdio!(LwfmMcpServer, "lwfm_mcp");
