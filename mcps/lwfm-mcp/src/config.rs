//! Configuration for the lwfm MCP server
//!
//! Searched in order:
//! 1. `LWFM_MCP_CONFIG` env var
//! 2. `~/.lwfm/mcp.toml`
//! 3. `./lwfm-mcp.toml`
//! 4. `$XDG_CONFIG_HOME/lwfm-mcp/config.toml`
//! 5. Defaults
//!
//! `LWFM_MIDDLEWARE_URL` overrides the middleware URL from any source.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lwfm::{LocalSiteConfig, MiddlewareConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub middleware: MiddlewareConfig,
    #[serde(default)]
    pub local: LocalSiteConfig,
}

impl Config {
    /// Load from the first config file found, falling back to defaults
    ///
    /// An explicitly named file (`LWFM_MCP_CONFIG`) that cannot be read or
    /// parsed is an error; unparsable files in the standard locations are
    /// skipped with a warning.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("LWFM_MCP_CONFIG") {
            Ok(env_path) => {
                let config = Self::from_path(Path::new(&env_path))?;
                tracing::info!("Loaded config from LWFM_MCP_CONFIG={}", env_path);
                config
            }
            Err(_) => Self::from_standard_locations(),
        };

        if let Ok(url) = std::env::var("LWFM_MIDDLEWARE_URL") {
            tracing::info!("Middleware URL overridden by LWFM_MIDDLEWARE_URL={}", url);
            config.middleware.url = url;
        }

        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    fn from_standard_locations() -> Self {
        for path in standard_paths() {
            if !path.exists() {
                continue;
            }
            match Self::from_path(&path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    tracing::warn!("{:#}", e);
                }
            }
        }

        tracing::info!("Using default configuration");
        Self::default()
    }
}

fn standard_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".lwfm").join("mcp.toml"));
    }

    paths.push(PathBuf::from("lwfm-mcp.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("lwfm-mcp").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[middleware]\nurl = \"http://10.0.0.5:3000\"").unwrap();

        let config = Config::from_path(file.path()).unwrap();

        assert_eq!(config.middleware.url, "http://10.0.0.5:3000");
        assert_eq!(config.middleware.timeout_secs, MiddlewareConfig::default().timeout_secs);
        assert_eq!(config.local.shell, LocalSiteConfig::default().shell);
    }

    #[test]
    fn test_local_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[local]\nshell = \"/bin/bash\"\nworking_dir = \"/tmp/wf\"").unwrap();

        let config = Config::from_path(file.path()).unwrap();

        assert_eq!(config.local.shell, "/bin/bash");
        assert_eq!(config.local.working_dir, Some(PathBuf::from("/tmp/wf")));
    }

    #[test]
    fn test_invalid_file_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "middleware = 3").unwrap();

        assert!(Config::from_path(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_errors() {
        let result = Config::from_path(Path::new("/definitely/not/here.toml"));
        assert!(result.is_err());
    }
}
