//! design-lint CLI tool.
//!
//! Usage:
//! ```bash
//! design-lint audit --file-key KEY --token TOKEN [--format console|json|html]
//! design-lint audit --snapshot snapshot.json --audit-type components
//! design-lint fetch --file-key KEY --output snapshot.json
//! design-lint list-validators
//! design-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod adapter;
mod commands;
mod config_resolver;
mod report;

/// Design-token compliance auditor for design files
#[derive(Parser)]
#[command(name = "design-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit collections, text styles and components
    Audit(commands::audit::AuditArgs),

    /// Download file data into a snapshot for offline audits
    Fetch {
        #[command(flatten)]
        source: adapter::SourceArgs,

        /// Snapshot path (default: print to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List available validators
    ListValidators,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Audit(args) => commands::audit::run(args, cli.config.as_deref()).await,
        Commands::Fetch { source, output } => {
            commands::fetch::run(&source, output.as_deref()).await
        }
        Commands::ListValidators => {
            commands::list_validators::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
