//! The agent application: instantiated agents plus their chains

use anyhow::Result;

use crate::agent::{Agent, LlmAgent, ToolAgent};
use crate::chain::{AgentMap, Chain};
use crate::config::McpConfig;
use crate::error::ChainError;
use crate::llm::OllamaClient;
use crate::mcp::McpClientPool;
use crate::registry::{AgentRegistry, AgentSpec, APP_NAME};

/// Builds a runnable agent from its declaration
pub trait AgentFactory {
    fn create(&self, spec: &AgentSpec) -> Result<Box<dyn Agent>>;
}

/// Ollama-backed agents: a plain chat agent when no servers are declared,
/// otherwise a tool agent restricted to the declared servers
pub struct OllamaAgentFactory {
    ollama_url: String,
    model: String,
    mcp_config: McpConfig,
}

impl OllamaAgentFactory {
    pub fn new(ollama_url: impl Into<String>, model: impl Into<String>, mcp_config: McpConfig) -> Self {
        Self {
            ollama_url: ollama_url.into(),
            model: model.into(),
            mcp_config,
        }
    }
}

impl AgentFactory for OllamaAgentFactory {
    fn create(&self, spec: &AgentSpec) -> Result<Box<dyn Agent>> {
        if spec.servers.is_empty() {
            let llm = OllamaClient::new(&self.ollama_url, &self.model);
            return Ok(Box::new(LlmAgent::new(
                spec.name.clone(),
                &spec.instruction,
                Box::new(llm),
            )));
        }

        let servers = self
            .mcp_config
            .subset(&spec.servers)
            .map_err(|server| ChainError::MissingServer {
                agent: spec.name.clone(),
                server,
            })?;

        Ok(Box::new(ToolAgent::new(
            spec.name.clone(),
            spec.instruction.clone(),
            &self.ollama_url,
            &self.model,
            McpClientPool::new(servers),
        )))
    }
}

/// A named set of agents and chains, addressed by name
pub struct AgentApp {
    name: String,
    agent_names: Vec<String>,
    agents: AgentMap,
    chains: Vec<Chain>,
}

impl std::fmt::Debug for AgentApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentApp")
            .field("name", &self.name)
            .field("agents", &self.agent_names)
            .field("chains", &self.chains)
            .finish()
    }
}

impl AgentApp {
    /// Validate the registry and instantiate every declared agent
    pub fn build(registry: &AgentRegistry, factory: &dyn AgentFactory) -> Result<Self> {
        registry.validate()?;

        let mut agents = AgentMap::new();
        for spec in registry.agents() {
            tracing::debug!(agent = %spec.name, servers = ?spec.servers, "Creating agent");
            agents.insert(spec.name.clone(), factory.create(spec)?);
        }

        Ok(Self {
            name: APP_NAME.to_string(),
            agent_names: registry.agents().iter().map(|a| a.name.clone()).collect(),
            agents,
            chains: registry.chains().iter().cloned().map(Chain::new).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Agent names in declaration order
    pub fn agent_names(&self) -> &[String] {
        &self.agent_names
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chain(&self, name: &str) -> Option<&Chain> {
        self.chains.iter().find(|c| c.name() == name)
    }

    pub fn has_target(&self, name: &str) -> bool {
        self.agents.contains_key(name) || self.chain(name).is_some()
    }

    /// Send a message to a chain or a single agent
    pub async fn send(&mut self, target: &str, message: &str) -> Result<String> {
        if let Some(chain) = self.chains.iter().find(|c| c.name() == target) {
            let run = chain.run(&mut self.agents, message).await?;
            return Ok(run.output);
        }

        match self.agents.get_mut(target) {
            Some(agent) => agent.send(message).await,
            None => Err(ChainError::UnknownTarget(target.to_string()).into()),
        }
    }

    /// Reset every agent's conversation
    pub fn clear_histories(&mut self) {
        for agent in self.agents.values_mut() {
            agent.clear_history();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use crate::chain::tests::ScriptedAgent;
    use crate::config::McpServerConfig;
    use crate::registry::ChainSpec;

    struct ScriptedFactory {
        log: Arc<Mutex<Vec<(String, String)>>>,
        cleared: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedFactory {
        fn new() -> Self {
            Self {
                log: Arc::new(Mutex::new(Vec::new())),
                cleared: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl AgentFactory for ScriptedFactory {
        fn create(&self, spec: &AgentSpec) -> Result<Box<dyn Agent>> {
            Ok(ScriptedAgent::boxed(&spec.name, &self.log, &self.cleared))
        }
    }

    fn mcp_config(names: &[&str]) -> McpConfig {
        McpConfig {
            mcp_servers: names
                .iter()
                .map(|n| {
                    (
                        n.to_string(),
                        McpServerConfig {
                            command: "uvx".to_string(),
                            args: vec![format!("mcp-server-{}", n)],
                            env: HashMap::new(),
                        },
                    )
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_post_writer_presents_summary() {
        let factory = ScriptedFactory::new();
        let mut app = AgentApp::build(&AgentRegistry::with_defaults(), &factory).unwrap();

        let output = app.send("post_writer", "https://example.com").await.unwrap();

        assert_eq!(output, "page_summary_executive(url_fetcher(https://example.com))");
        let order: Vec<String> = factory.log.lock().unwrap().iter().map(|(a, _)| a.clone()).collect();
        assert_eq!(order, vec!["url_fetcher", "page_summary_executive"]);
    }

    #[tokio::test]
    async fn test_send_to_single_agent() {
        let factory = ScriptedFactory::new();
        let mut app = AgentApp::build(&AgentRegistry::with_defaults(), &factory).unwrap();

        let output = app.send("filesystem", "list files").await.unwrap();
        assert_eq!(output, "filesystem(list files)");
    }

    #[tokio::test]
    async fn test_unknown_target() {
        let factory = ScriptedFactory::new();
        let mut app = AgentApp::build(&AgentRegistry::with_defaults(), &factory).unwrap();

        let err = app.send("lwfm_agent", "hi").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ChainError>(),
            Some(&ChainError::UnknownTarget("lwfm_agent".to_string()))
        );
        assert!(factory.log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_registry_aborts_build() {
        let mut registry = AgentRegistry::with_defaults();
        registry.register_chain(ChainSpec::new("broken", &["missing"]));

        let err = AgentApp::build(&registry, &ScriptedFactory::new()).unwrap_err();
        assert!(err.downcast_ref::<ChainError>().is_some());
    }

    #[test]
    fn test_clear_histories() {
        let factory = ScriptedFactory::new();
        let mut app = AgentApp::build(&AgentRegistry::with_defaults(), &factory).unwrap();

        app.clear_histories();

        let mut cleared = factory.cleared.lock().unwrap().clone();
        cleared.sort();
        assert_eq!(
            cleared,
            vec!["filesystem", "page_summary_executive", "url_fetcher", "windows_cli"]
        );
    }

    #[test]
    fn test_app_metadata() {
        let app = AgentApp::build(&AgentRegistry::with_defaults(), &ScriptedFactory::new()).unwrap();

        assert_eq!(app.name(), "Agent Chaining");
        assert_eq!(app.agent_names().len(), 4);
        assert!(app.has_target("post_writer"));
        assert!(app.has_target("windows_cli"));
        assert!(!app.has_target("lwfm_agent"));
    }

    #[test]
    fn test_ollama_factory_missing_server() {
        let factory = OllamaAgentFactory::new("http://localhost:11434", "llama3.1:8b", mcp_config(&["fetch"]));

        let err = AgentApp::build(&AgentRegistry::with_defaults(), &factory).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ChainError>(),
            Some(&ChainError::MissingServer {
                agent: "filesystem".to_string(),
                server: "filesystem".to_string(),
            })
        );
    }

    #[test]
    fn test_ollama_factory_builds_all_agents() {
        let factory = OllamaAgentFactory::new(
            "http://localhost:11434",
            "llama3.1:8b",
            mcp_config(&["fetch", "filesystem", "windows-cli"]),
        );

        let app = AgentApp::build(&AgentRegistry::with_defaults(), &factory).unwrap();
        assert_eq!(
            app.agent_names(),
            &["url_fetcher", "page_summary_executive", "filesystem", "windows_cli"]
        );
    }
}
