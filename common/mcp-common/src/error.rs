//! Error helpers for MCP servers
//!
//! Collaborator errors keep their display text when they become MCP errors,
//! so the calling agent sees exactly what the library reported.

use rmcp::ErrorData as McpError;

/// Create an internal error with a message
///
/// ```rust,ignore
/// let site = sites.get_site("local").map_err(|e| internal_error(e.to_string()))?;
/// ```
pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

/// Create an invalid params error with a message
///
/// Use this when the tool receives arguments it cannot act on.
pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_error_keeps_message() {
        let err = internal_error("Site not found: local");
        assert_eq!(err.message, "Site not found: local");
    }

    #[test]
    fn test_invalid_params() {
        let err = invalid_params("bad param");
        assert!(err.message.contains("bad param"));
    }
}
