//! FlowPilot - Main Entry Point
//!
//! This is the main entry point for the FlowPilot application.
//! The actual implementation is in the `flowpilot` library.

use anyhow::Result;
use clap::Parser;
use flowpilot::{Config, FlowPilotHandler};
use mcp_attr::server::serve_stdio;
use tracing_subscriber::EnvFilter;

/// FlowPilot - natural-language task extraction via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Extract tasks from this text once and print them instead of serving MCP
    #[arg(long)]
    text: Option<String>,

    /// Reference time for relative dates (RFC 3339 or YYYY-MM-DDTHH:MM:SS)
    #[arg(long, requires = "text")]
    now: Option<String>,

    /// Print a text summary instead of JSON
    #[arg(long, requires = "text")]
    summary: bool,

    /// Use task-1, task-2, ... instead of random ids
    #[arg(long, requires = "text")]
    sequential_ids: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Logs go to stderr; stdout carries the MCP protocol
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = Config::load(args.config.as_deref())?;
    let handler = FlowPilotHandler::new(config)?;

    match args.text {
        Some(text) => {
            let output = handler
                .run_once(&text, args.now.as_deref(), args.summary, args.sequential_ids)
                .await?;
            println!("{}", output);
        }
        None => serve_stdio(handler).await?,
    }
    Ok(())
}
