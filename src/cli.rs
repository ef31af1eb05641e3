use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pdf::split::{LoadFailurePolicy, PagePolicy};

#[derive(Parser)]
#[command(name = "single-pdf")]
#[command(about = "Split PDFs into single-page files, with MCP server support")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Display PDF metadata and the files a split would produce
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Split PDF into one file per page, next to the source
    #[command(alias = "burst")]
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Which documents to split
        #[arg(short, long, value_enum, default_value_t = PagePolicy::SkipSingle)]
        policy: PagePolicy,

        /// What to print when the file cannot be parsed
        #[arg(long, value_enum, default_value_t = LoadFailurePolicy::ReturnSource)]
        on_load_failure: LoadFailurePolicy,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}
