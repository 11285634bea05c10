//! MCP Server implementation for lwfm workflow tooling
//!
//! Tools and the prompt delegate to the handlers and prompts modules.

use lwfm::SiteRegistry;
use mcp_common::{
    async_trait, text_success, EmbeddableError, EmbeddableMcp, EmbeddableResult, McpError,
};
use rmcp::{
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolResult, GetPromptRequestParam, GetPromptResult, Implementation,
        ListPromptsResult, PaginatedRequestParam, PromptMessage, PromptMessageRole,
        ServerCapabilities, ServerInfo, Tool,
    },
    prompt, prompt_handler, prompt_router,
    service::RequestContext,
    tool, tool_handler, tool_router, RoleServer,
};
use serde_json::Value;

use crate::config::Config;
use crate::handlers::{self, lwfm_error_to_mcp};
use crate::params::*;
use crate::prompts::{end_to_end_message, SERVICE_INSTRUCTIONS};

/// Name advertised in the MCP handshake
pub const SERVER_NAME: &str = "lwfm-server";

/// The lwfm MCP Server
#[derive(Clone)]
pub struct LwfmMcpServer {
    sites: SiteRegistry,
    tool_router: ToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl LwfmMcpServer {
    /// Load configuration and build a server with the Local site
    pub fn load() -> anyhow::Result<Self> {
        let config = Config::load()?;
        Self::with_config(&config)
    }

    pub fn with_config(config: &Config) -> anyhow::Result<Self> {
        tracing::info!(middleware = %config.middleware.url, "Using lwfm middleware");
        let sites = SiteRegistry::with_local(&config.middleware, config.local.clone())?;
        Ok(Self::with_sites(sites))
    }

    /// Build a server over an explicit set of sites
    pub fn with_sites(sites: SiteRegistry) -> Self {
        Self {
            sites,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
        }
    }

    #[tool(
        description = "Make a new workflow, give it a name, and provide a natural language description of what it intends to do. Add other optional metadata. Returns the workflow id."
    )]
    async fn initiate_workflow(
        &self,
        Parameters(params): Parameters<InitiateWorkflowParams>,
    ) -> Result<CallToolResult, McpError> {
        let workflow = handlers::initiate_workflow(params);
        Ok(text_success(workflow.workflow_id()))
    }

    #[tool(
        description = "Run the workflow: submit the entry point and arguments to the Local site and return the initial job status."
    )]
    async fn run_workflow(
        &self,
        Parameters(params): Parameters<RunWorkflowParams>,
    ) -> Result<CallToolResult, McpError> {
        let status = handlers::run_workflow(&self.sites, params)
            .await
            .map_err(lwfm_error_to_mcp)?;
        Ok(text_success(status.get_status()))
    }
}

// ============================================================================
// Prompt Router
// ============================================================================

#[prompt_router]
impl LwfmMcpServer {
    #[prompt(
        name = "end_to_end_workflow",
        description = "Generates a user prompt to initiate an end to end quantum circuit workflow on a target backend, which might be a local simulator or a remote quantum computer."
    )]
    async fn end_to_end_workflow(
        &self,
        Parameters(args): Parameters<EndToEndWorkflowArgs>,
    ) -> Vec<PromptMessage> {
        vec![PromptMessage::new_text(
            PromptMessageRole::User,
            end_to_end_message(&args.name, args.description.as_deref()),
        )]
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
#[prompt_handler]
impl rmcp::ServerHandler for LwfmMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(SERVICE_INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for LwfmMcpServer {
    fn server_name(&self) -> &str {
        SERVER_NAME
    }

    fn server_description(&self) -> Option<&str> {
        Some(SERVICE_INSTRUCTIONS)
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "initiate_workflow" => {
                let params: InitiateWorkflowParams = serde_json::from_value(params)?;
                self.initiate_workflow(Parameters(params))
                    .await
                    .map_err(Into::into)
            }

            "run_workflow" => {
                let params: RunWorkflowParams = serde_json::from_value(params)?;
                self.run_workflow(Parameters(params)).await.map_err(Into::into)
            }

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}
