//! Agent Chaining CLI
//!
//! Usage:
//!   agent-chain                              # interactive session on post_writer
//!   agent-chain --target filesystem          # start on a single agent
//!   agent-chain --message https://example.com # one-shot send, then exit

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_chain::{
    AgentApp, AgentRegistry, ChainError, ChainFileConfig, McpConfig, OllamaAgentFactory, Repl,
    DEFAULT_TARGET,
};

#[derive(Parser)]
#[command(name = "agent-chain")]
#[command(about = "Run named Ollama agents and chains with MCP tools")]
#[command(version)]
struct Cli {
    /// Ollama server URL (overrides .chain.toml)
    #[arg(long, env = "OLLAMA_URL")]
    ollama_url: Option<String>,

    /// Model to use (overrides .chain.toml)
    #[arg(short, long, env = "OLLAMA_MODEL")]
    model: Option<String>,

    /// Agent or chain receiving messages
    #[arg(short, long, default_value = DEFAULT_TARGET)]
    target: String,

    /// Send a single message and exit
    #[arg(long)]
    message: Option<String>,

    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialize tracing on stderr so the session output stays clean
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // Allow RUST_LOG to override if set
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file_config = ChainFileConfig::load()?;
    let ollama_url = cli.ollama_url.unwrap_or(file_config.llm.url);
    let model = cli.model.unwrap_or(file_config.llm.model);
    let mcp_config = McpConfig::load()?.unwrap_or_default();

    tracing::info!(ollama_url = %ollama_url, model = %model, "Starting agent chain");

    let registry = AgentRegistry::with_defaults();
    let factory = OllamaAgentFactory::new(ollama_url, model, mcp_config);
    let mut app = AgentApp::build(&registry, &factory)?;

    if !app.has_target(&cli.target) {
        return Err(ChainError::UnknownTarget(cli.target).into());
    }

    if let Some(message) = cli.message {
        let response = app.send(&cli.target, &message).await?;
        println!("{}", response);
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut repl = Repl::new(&mut app, cli.target, stdin.lock(), std::io::stdout());
    repl.run().await
}
