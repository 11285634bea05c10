//! Configuration loading
//!
//! Two files are read, each located by walking up from the working directory
//! and then falling back to `~/.config/lwfm-agents/`:
//! - `.mcp.json`: the MCP servers agents can be bound to
//! - `.chain.toml`: LLM connection settings

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir used as global fallback
const GLOBAL_CONFIG_DIR: &str = "lwfm-agents";

/// Find a config file by walking up the directory tree, then checking global config.
fn find_config_file(filename: &str) -> Option<PathBuf> {
    let found = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_upwards(&cwd, filename));
    if found.is_some() {
        return found;
    }

    let global_path = dirs::config_dir()?.join(GLOBAL_CONFIG_DIR).join(filename);
    global_path.exists().then_some(global_path)
}

/// Walk from `start` to the filesystem root looking for `filename`
fn find_upwards(start: &Path, filename: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.exists())
}

// ============================================================================
// MCP Server Configuration (.mcp.json)
// ============================================================================

/// MCP server configuration (from .mcp.json)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct McpConfig {
    #[serde(rename = "mcpServers")]
    pub mcp_servers: HashMap<String, McpServerConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct McpServerConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl McpConfig {
    /// Load MCP config from the nearest .mcp.json, if any
    pub fn load() -> Result<Option<Self>> {
        if let Some(config_path) = find_config_file(".mcp.json") {
            tracing::debug!("Loading MCP config from: {}", config_path.display());
            return Self::load_from_path(&config_path).map(Some);
        }

        tracing::debug!("No .mcp.json found");
        Ok(None)
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: McpConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Restrict the config to the named servers, failing on the first one not declared
    pub fn subset(&self, servers: &[String]) -> std::result::Result<Self, String> {
        let mut mcp_servers = HashMap::new();
        for name in servers {
            let server = self.mcp_servers.get(name).ok_or_else(|| name.clone())?;
            mcp_servers.insert(name.clone(), server.clone());
        }
        Ok(Self { mcp_servers })
    }
}

// ============================================================================
// Chain Configuration (.chain.toml)
// ============================================================================

/// Top-level chain configuration (from .chain.toml)
#[derive(Debug, Default, Deserialize)]
pub struct ChainFileConfig {
    #[serde(default)]
    pub llm: LlmConfig,
}

/// LLM configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_ollama_url")]
    pub url: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.1:8b".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            model: default_model(),
        }
    }
}

impl ChainFileConfig {
    /// Load from the nearest .chain.toml, or defaults when none exists
    pub fn load() -> Result<Self> {
        match find_config_file(".chain.toml") {
            Some(path) => {
                tracing::debug!("Loading chain config from: {}", path.display());
                Self::load_from_path(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MCP_JSON: &str = r#"{
        "mcpServers": {
            "fetch": { "command": "uvx", "args": ["mcp-server-fetch"] },
            "filesystem": {
                "command": "npx",
                "args": ["-y", "@modelcontextprotocol/server-filesystem", "."],
                "env": { "HOME_DIR": "$HOME" }
            }
        }
    }"#;

    #[test]
    fn test_parse_mcp_config() {
        let config: McpConfig = serde_json::from_str(MCP_JSON).unwrap();

        assert_eq!(config.mcp_servers.len(), 2);
        let fetch = &config.mcp_servers["fetch"];
        assert_eq!(fetch.command, "uvx");
        assert_eq!(fetch.args, vec!["mcp-server-fetch"]);
        assert!(fetch.env.is_empty());
        assert_eq!(config.mcp_servers["filesystem"].env["HOME_DIR"], "$HOME");
    }

    #[test]
    fn test_subset() {
        let config: McpConfig = serde_json::from_str(MCP_JSON).unwrap();

        let fetch_only = config.subset(&["fetch".to_string()]).unwrap();
        assert_eq!(fetch_only.mcp_servers.len(), 1);
        assert!(fetch_only.mcp_servers.contains_key("fetch"));

        let missing = config.subset(&["fetch".to_string(), "windows-cli".to_string()]);
        assert_eq!(missing.unwrap_err(), "windows-cli");
    }

    #[test]
    fn test_find_upwards() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".mcp.json"), MCP_JSON).unwrap();

        let found = find_upwards(&nested, ".mcp.json").unwrap();
        assert_eq!(found, dir.path().join(".mcp.json"));
        assert!(find_upwards(&nested, ".no-such-file.json").is_none());
    }

    #[test]
    fn test_load_chain_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".chain.toml");
        std::fs::write(&path, "[llm]\nmodel = \"qwen3:14b\"\n").unwrap();

        let config = ChainFileConfig::load_from_path(&path).unwrap();
        assert_eq!(config.llm.model, "qwen3:14b");
        assert_eq!(config.llm.url, "http://localhost:11434");
    }

    #[test]
    fn test_load_invalid_mcp_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".mcp.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = McpConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
