//! plan-mcp - AI project planning, code review, and execution analysis
//!
//! Usage:
//!   plan-mcp serve                     Start MCP server on stdio
//!   plan-mcp plan "description"        Create a project plan
//!   plan-mcp review src/main.rs        Review a source file
//!   plan-mcp review-dir ./project      Review a whole directory
//!   plan-mcp tools                     List MCP tools
//!   plan-mcp --help                    Show all commands

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use plan_mcp::cli::output::OutputMode;
use plan_mcp::cli::{Cli, Commands};
use plan_mcp::config::Config;
use plan_mcp::init::AppContext;
use plan_mcp::mcp::run_mcp_server;

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so env-backed flags see it
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::resolve(&cli.config)?;

    // Tracing to stderr (safe for MCP stdio transport)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("plan_mcp={}", config.log_level)))?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    if let Some(source) = &config.source {
        tracing::info!("Loaded config from {}", source.display());
    }

    let mode = OutputMode::from_flags(cli.json, cli.md);

    match &cli.command {
        Commands::Serve => {
            let ctx = AppContext::new(&config)?;
            run_mcp_server(ctx).await?;
        }
        cmd if !cmd.needs_backend() => {
            plan_mcp::cli::execute_offline(cmd, mode).await?;
        }
        cmd => {
            let ctx = AppContext::new(&config)?;
            plan_mcp::cli::execute(cmd, &ctx, mode).await?;
        }
    }

    Ok(())
}
