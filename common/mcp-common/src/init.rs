//! Server initialization utilities
//!
//! Standardized tracing setup and the `serve_stdio!` macro.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging for MCP servers
///
/// Logs go to stderr (stdout carries the MCP protocol), without ANSI colors,
/// filtered by `RUST_LOG` with `info` as the default for `crate_name`.
/// `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let directive = format!("{}=info", crate_name);
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// Macro for standardized MCP server initialization
///
/// Expands to a `#[tokio::main] async fn main()` that initializes tracing,
/// builds the server with `<$server_type>::load()`, serves it over stdio and
/// waits for the client to disconnect.
///
/// `load` must return `Result<Self, E>` with `E: Into<anyhow::Error>`, so a
/// server that cannot read its configuration fails before the transport
/// opens.
///
/// ```rust,ignore
/// use lwfm_mcp::LwfmMcpServer;
///
/// mcp_common::serve_stdio!(LwfmMcpServer, "lwfm_mcp");
/// ```
#[macro_export]
macro_rules! serve_stdio {
    ($server_type:ty, $crate_name:expr) => {
        #[tokio::main]
        async fn main() -> anyhow::Result<()> {
            use rmcp::ServiceExt;

            $crate::init_tracing($crate_name)?;

            tracing::info!(
                version = env!("CARGO_PKG_VERSION"),
                concat!("Starting ", $crate_name, " MCP Server")
            );

            let server = <$server_type>::load()?;
            let service = server.serve(rmcp::transport::stdio()).await?;

            tracing::info!("Server running, waiting for requests...");

            service.waiting().await?;

            tracing::info!("Server shutting down");
            Ok(())
        }
    };
}
