//! Migration Assistant CLI - command-line front end for the tool surface (C3)
//!
//! Provides commands for:
//! - Serving the tool surface over MCP stdio for an agent runtime
//! - Checking migration status outside of an agent turn
//! - Generating the Day-7 migration report
//! - Generating shell completions

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::completions::CompletionsCommand;
use commands::report::ReportCommand;
use commands::serve::ServeCommand;
use commands::status::StatusCommand;
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "migration-agent", version, about = "Media-migration orchestration tool surface")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the tool surface over MCP stdio
    Serve(ServeCommand),
    /// Show migration status for a given day (T5, outside an agent turn)
    Status(StatusCommand),
    /// Generate the Day-7 migration report (T7)
    Report(ReportCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        // stdout is the MCP stdio transport's wire for `serve`; logs go to stderr.
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match cli.command {
        Commands::Serve(cmd) => cmd.execute(format).await,
        Commands::Status(cmd) => cmd.execute(format).await,
        Commands::Report(cmd) => cmd.execute(format).await,
        Commands::Completions(cmd) => cmd.execute(format).await,
    }
}
