//! # fn-push Local Zip Command
//!
//! File: cli/src/commands/zip_file.rs
//!
//! ## Overview
//!
//! Builds the same archive the upload commands would and writes it to a local
//! file instead. Handy for checking what a set of globs selects before
//! publishing anything.
//!
//! ```bash
//! fn-push zip -p dist -e '**/*.map' --root-dir nodejs -o /tmp/function.zip
//! unzip -l /tmp/function.zip
//! ```
//!
use super::package::PackageArgs;
use crate::common::archive;
use crate::core::config;
use crate::core::error::Result;
use anyhow::{bail, Context};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Arguments for `fn-push zip`.
#[derive(Parser, Debug)]
pub struct ZipArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    /// Where to write the archive.
    #[arg(short, long, required_unless_present = "list")]
    pub output: Option<PathBuf>,

    /// Print the selected files instead of writing an archive.
    #[arg(long)]
    pub list: bool,
}

/// Entry point for `fn-push zip`.
pub async fn handle_zip(args: ZipArgs) -> Result<()> {
    info!("Handling zip command...");
    debug!("Zip args: {:?}", args);

    let cfg = config::load_config().context("Failed to load fn-push configuration")?;
    let spec = args.package.to_spec(&cfg.package)?;

    if args.list {
        for path in archive::build_file_list(&spec)? {
            println!("{}", path);
        }
        return Ok(());
    }

    let Some(output) = args.output else {
        bail!("--output is required unless --list is given");
    };
    let bytes = archive::create(&spec).context("Failed to build archive")?;
    fs::write(&output, &bytes)
        .with_context(|| format!("Failed to write archive to {}", output.display()))?;
    println!("Wrote {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}
