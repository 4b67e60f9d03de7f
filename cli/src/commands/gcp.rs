//! # fn-push GCP Command
//!
//! File: cli/src/commands/gcp.rs
//!
//! ## Overview
//!
//! Zips up function assets and uploads them to Google Cloud Storage for use in
//! Cloud Functions. The same archive is uploaded to every bucket given.
//!
//! ## Examples
//!
//! ```bash
//! export GOOGLE_OAUTH_ACCESS_TOKEN="$(gcloud auth print-access-token)"
//! fn-push gcp -b fn-assets -f api/handler --version-suffix 1.4.0 -e '**/*.test.js'
//! ```
//!
use super::package::{archive_key, PackageArgs};
use crate::common::archive;
use crate::common::storage::{self, gcs::GcsStore};
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

/// Arguments for `fn-push gcp`.
#[derive(Parser, Debug)]
pub struct GcpArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    /// Bucket to upload to. Repeat for several buckets.
    #[arg(short, long, required = true)]
    pub buckets: Vec<String>,

    /// Key of the function zip in the bucket, without the .zip extension.
    #[arg(short, long, alias = "functionKey")]
    pub function_key: String,

    /// Appended to the function key as "-<suffix>".
    #[arg(long, alias = "versionSuffix")]
    pub version_suffix: Option<String>,

    /// OAuth 2.0 access token used for the upload.
    #[arg(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,
}

/// Entry point for `fn-push gcp`.
pub async fn handle_gcp(args: GcpArgs) -> Result<()> {
    info!("Handling gcp command...");
    debug!("GCP buckets: {:?}, function key: {}", args.buckets, args.function_key);

    let cfg = config::load_config().context("Failed to load fn-push configuration")?;
    let spec = args.package.to_spec(&cfg.package)?;
    let key = archive_key(&args.function_key, args.version_suffix.as_deref());

    let bytes = archive::create(&spec).with_context(|| format!("Failed to build archive '{}'", key))?;
    info!("Built {} ({} bytes)", key, bytes.len());
    let objects = vec![(key, bytes)];

    let store = GcsStore::new(&args.access_token)?;
    for bucket in &args.buckets {
        storage::upload_all(&store, bucket, &objects)
            .await
            .with_context(|| format!("Failed to upload to gs://{}", bucket))?;
    }
    Ok(())
}
