//! # fn-push Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file is the entry point for the `fn-push` CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the subcommand handlers
//!
//! ## Architecture
//!
//! - Each subcommand (`aws`, `gcp`, `zip`) is a variant of the `Commands` enum
//! - Handlers live in `commands::*` and share the packaging pipeline in `common::archive`
//! - All errors are propagated to this level, logged, and turned into exit code 1
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! fn-push --help
//!
//! # Upload with info-level logging
//! fn-push -v aws -r eu-west-2 -b my-bucket -f my-function
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand argument definitions and handlers.
mod common; // Packaging pipeline, filesystem view and upload backends.
mod core; // Configuration and error types.

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "fn-push",
    about = "Package function code into a zip archive and push it to object storage",
    long_about = "Selects files with include/exclude globs, builds a zip archive in memory\n\
                  and uploads it to S3 (for Lambda) or Cloud Storage (for Cloud Functions).",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available subcommands.
#[derive(Parser, Debug)]
enum Commands {
    /// Upload lambda assets to S3
    Aws(commands::aws::AwsArgs),
    /// Upload function assets to Cloud Storage
    Gcp(commands::gcp::GcpArgs),
    /// Write the archive to a local file
    Zip(commands::zip_file::ZipArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Aws(args) => commands::aws::handle_aws(args).await,
        Commands::Gcp(args) => commands::gcp::handle_gcp(args).await,
        Commands::Zip(args) => commands::zip_file::handle_zip(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
