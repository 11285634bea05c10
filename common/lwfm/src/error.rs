//! Error types for lwfm client operations

use thiserror::Error;

/// Errors raised by the lwfm object model, sites and the middleware client
#[derive(Error, Debug)]
pub enum LwfmError {
    #[error("Site not found: {0}")]
    SiteNotFound(String),

    #[error("Authentication failed for site {site}: {reason}")]
    AuthFailed { site: String, reason: String },

    #[error("Invalid job definition: {0}")]
    InvalidJobDefn(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Middleware request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Middleware returned {status}: {body}")]
    Middleware { status: u16, body: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for lwfm operations
pub type LwfmResult<T> = Result<T, LwfmError>;
