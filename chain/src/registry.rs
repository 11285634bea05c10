//! Agent and chain declarations
//!
//! The registry is built imperatively at startup and validated once before
//! any agent is instantiated.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::agent::DEFAULT_INSTRUCTION;
use crate::error::{ChainError, ChainResult};

/// Application name shown in the REPL banner
pub const APP_NAME: &str = "Agent Chaining";

/// Chain started by default
pub const DEFAULT_TARGET: &str = "post_writer";

/// Declaration of one agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,

    /// System instruction given to the model
    pub instruction: String,

    /// MCP servers (keys of `.mcp.json`) the agent can use; empty = no tools
    #[serde(default)]
    pub servers: Vec<String>,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
            servers: Vec::new(),
        }
    }

    /// Agent with the default instruction bound to MCP servers
    pub fn with_servers(name: impl Into<String>, servers: &[&str]) -> Self {
        Self {
            name: name.into(),
            instruction: DEFAULT_INSTRUCTION.to_string(),
            servers: servers.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Declaration of a linear chain of agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSpec {
    pub name: String,
    pub sequence: Vec<String>,
}

impl ChainSpec {
    pub fn new(name: impl Into<String>, sequence: &[&str]) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Ordered registry of agents and chains
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: Vec<AgentSpec>,
    chains: Vec<ChainSpec>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in agents and the `post_writer` chain
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register_agent(AgentSpec {
            servers: vec!["fetch".to_string()],
            ..AgentSpec::new(
                "url_fetcher",
                "Given a URL, provide a complete and comprehensive summary",
            )
        });
        registry.register_agent(AgentSpec::new(
            "page_summary_executive",
            "Write a 280 character executive summary for any given text. \
             Respond only with the post, never use hashtags.",
        ));
        registry.register_agent(AgentSpec::with_servers("filesystem", &["filesystem"]));
        registry.register_agent(AgentSpec::with_servers("windows_cli", &["windows-cli"]));

        registry.register_chain(ChainSpec::new(
            DEFAULT_TARGET,
            &["url_fetcher", "page_summary_executive"],
        ));

        registry
    }

    pub fn register_agent(&mut self, spec: AgentSpec) {
        self.agents.push(spec);
    }

    pub fn register_chain(&mut self, spec: ChainSpec) {
        self.chains.push(spec);
    }

    /// Agents in declaration order
    pub fn agents(&self) -> &[AgentSpec] {
        &self.agents
    }

    /// Chains in declaration order
    pub fn chains(&self) -> &[ChainSpec] {
        &self.chains
    }

    pub fn agent(&self, name: &str) -> Option<&AgentSpec> {
        self.agents.iter().find(|a| a.name == name)
    }

    pub fn chain(&self, name: &str) -> Option<&ChainSpec> {
        self.chains.iter().find(|c| c.name == name)
    }

    /// Check names are unique and every chain references declared agents
    pub fn validate(&self) -> ChainResult<()> {
        let mut agent_names = HashSet::new();
        for agent in &self.agents {
            if !agent_names.insert(agent.name.as_str()) {
                return Err(ChainError::DuplicateAgent(agent.name.clone()));
            }
        }

        let mut chain_names = HashSet::new();
        for chain in &self.chains {
            if !chain_names.insert(chain.name.as_str()) {
                return Err(ChainError::DuplicateChain(chain.name.clone()));
            }
            if agent_names.contains(chain.name.as_str()) {
                return Err(ChainError::NameCollision(chain.name.clone()));
            }
            if chain.sequence.is_empty() {
                return Err(ChainError::EmptyChain(chain.name.clone()));
            }
            if let Some(unknown) = chain
                .sequence
                .iter()
                .find(|name| !agent_names.contains(name.as_str()))
            {
                return Err(ChainError::UnknownAgent {
                    chain: chain.name.clone(),
                    agent: unknown.clone(),
                });
            }
        }

        Ok(())
    }
}
