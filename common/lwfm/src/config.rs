//! Connection and site settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the lwfm middleware listens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    #[serde(default = "default_middleware_url")]
    pub url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_middleware_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            url: default_middleware_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Settings for the Local site's run driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalSiteConfig {
    /// Shell used to run entry points
    #[serde(default = "default_shell")]
    pub shell: String,
    /// Working directory for jobs (defaults to the current directory)
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

#[cfg(windows)]
fn default_shell() -> String {
    "cmd".to_string()
}

#[cfg(not(windows))]
fn default_shell() -> String {
    "/bin/sh".to_string()
}

impl Default for LocalSiteConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            working_dir: None,
        }
    }
}

impl LocalSiteConfig {
    /// The flag that makes the shell run a single command string
    pub fn command_flag(&self) -> &'static str {
        if self.shell.eq_ignore_ascii_case("cmd") || self.shell.ends_with("cmd.exe") {
            "/C"
        } else {
            "-c"
        }
    }
}
