mod cli;
mod commands;
mod mcp;
mod pdf;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use pdf::split::SplitOptions;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries results and the MCP protocol.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Info { path } => {
            commands::info::run(&path)?;
        }
        Commands::Split {
            path,
            policy,
            on_load_failure,
            json,
        } => {
            let options = SplitOptions {
                page_policy: policy,
                on_load_failure,
            };
            commands::split::run(&path, &options, json)?;
        }
    }

    Ok(())
}
