//! apicheck CLI - Go API compatibility checker
//!
//! Compares the exported API of a Go package between two revisions and
//! reports breaking changes.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{check, decls};
use config::ApicheckConfig;
use output::OutputFormat;

/// Detect breaking changes in a Go package's API.
#[derive(Parser)]
#[command(name = "apicheck")]
#[command(author, version)]
#[command(about = "Detect breaking changes in a Go package's API")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  apicheck check                     Compare HEAD with the working tree
  apicheck check ./pkg --before v1.2.0 --after HEAD
  apicheck check --vcs fs --before old --after new
  apicheck decls ./pkg --private     Show the extracted surface")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a package between two revisions
    #[command(visible_alias = "c")]
    Check(check::CheckArgs),

    /// Show the declarations extracted from a package at one revision
    #[command(visible_alias = "d")]
    Decls(decls::DeclsArgs),
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir()?;
    let config = ApicheckConfig::load(&cwd);
    let format = cli.format.unwrap_or_else(|| config.output_format());
    if let Some(color) = config.output.color {
        colored::control::set_override(color);
    }

    match cli.command {
        Commands::Check(args) => {
            let breaking = check::run(args, &config, format)?;
            if breaking {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Decls(args) => decls::run(args, &config, format),
    }
}
