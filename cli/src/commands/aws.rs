//! # fn-push AWS Command
//!
//! File: cli/src/commands/aws.rs
//!
//! ## Overview
//!
//! Zips up function assets and uploads them to S3 for use in Lambda functions.
//! Optionally splits `node_modules` out into a second archive that can be
//! published as a Lambda layer.
//!
//! ## Examples
//!
//! ```bash
//! # One archive, uploaded to a bucket in each of two regions
//! fn-push aws -r eu-west-2 -b assets-eu -r us-east-1 -b assets-us -f api/handler
//!
//! # Function and layer archives, function linked to the layer's modules
//! fn-push aws -r eu-west-2 -b assets-eu -f api/handler -l api/deps -n --version-suffix 1.4.0
//! ```
//!
//! Command flow:
//! 1. Merge flags with the configuration file into a `PackageSpec`
//! 2. Pair regions with buckets
//! 3. Build every archive once
//! 4. Upload each archive to every (region, bucket) destination
//!
use super::package::{archive_key, PackageArgs};
use crate::common::archive::{self, PackageSpec};
use crate::common::storage::{self, s3::S3Store};
use crate::core::config::{self, AwsConfig};
use crate::core::error::{FnPushError, Result};
use anyhow::{anyhow, Context};
use clap::Parser;
use tracing::{debug, info};

/// Glob selecting a Node.js project's dependencies.
pub const NODE_MODULES_GLOB: &str = "node_modules/**";

/// Arguments for `fn-push aws`.
#[derive(Parser, Debug)]
pub struct AwsArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    /// Region to upload to. Repeat for several regions.
    #[arg(short, long)]
    pub regions: Vec<String>,

    /// Bucket to upload to, in the same order as the regions.
    #[arg(short, long)]
    pub buckets: Vec<String>,

    /// Key of the function zip in the bucket, without the .zip extension.
    #[arg(short, long, alias = "functionKey")]
    pub function_key: String,

    /// Split node_modules into a separate layer zip stored under this key.
    #[arg(short, long, alias = "layerKey")]
    pub layer_key: Option<String>,

    /// Appended to the function and layer keys as "-<suffix>".
    #[arg(long, alias = "versionSuffix")]
    pub version_suffix: Option<String>,
}

/// One archive to build and the key it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePlan {
    pub key: String,
    pub spec: PackageSpec,
}

/// Works out which archives to build.
///
/// Without a layer key there is a single function archive. With one, the
/// layer archive holds `node_modules/**` only, and the function archive leaves
/// `node_modules` out whenever it links to the layer.
pub fn plan_archives(
    spec: &PackageSpec,
    function_key: &str,
    layer_key: Option<&str>,
    version_suffix: Option<&str>,
) -> Vec<ArchivePlan> {
    let function_key = archive_key(function_key, version_suffix);
    let Some(layer_key) = layer_key.filter(|k| !k.is_empty()) else {
        return vec![ArchivePlan {
            key: function_key,
            spec: spec.clone(),
        }];
    };

    let mut function_spec = spec.clone();
    if spec.symlink_node_modules {
        function_spec.exclude.push(NODE_MODULES_GLOB.to_string());
    }
    let layer_spec = PackageSpec {
        include: vec![NODE_MODULES_GLOB.to_string()],
        exclude: Vec::new(),
        symlink_node_modules: false,
        ..spec.clone()
    };
    vec![
        ArchivePlan {
            key: function_key,
            spec: function_spec,
        },
        ArchivePlan {
            key: archive_key(layer_key, version_suffix),
            spec: layer_spec,
        },
    ]
}

/// Pairs regions with buckets by index, falling back to the configured lists
/// when none are given on the command line.
pub fn destinations(args: &AwsArgs, config: &AwsConfig) -> Result<Vec<(String, String)>> {
    let (regions, buckets) = if args.regions.is_empty() && args.buckets.is_empty() {
        (&config.regions, &config.buckets)
    } else {
        (&args.regions, &args.buckets)
    };
    if regions.is_empty() {
        return Err(anyhow!(FnPushError::ArgumentParsing(
            "at least one --regions/--buckets pair is required".to_string()
        )));
    }
    if regions.len() != buckets.len() {
        return Err(anyhow!(FnPushError::ArgumentParsing(format!(
            "got {} regions but {} buckets; they are paired by position",
            regions.len(),
            buckets.len()
        ))));
    }
    Ok(regions.iter().cloned().zip(buckets.iter().cloned()).collect())
}

/// Entry point for `fn-push aws`.
pub async fn handle_aws(args: AwsArgs) -> Result<()> {
    info!("Handling aws command...");
    debug!("AWS args: {:?}", args);

    let cfg = config::load_config().context("Failed to load fn-push configuration")?;
    let spec = args.package.to_spec(&cfg.package)?;
    let destinations = destinations(&args, &cfg.aws)?;

    let plans = plan_archives(
        &spec,
        &args.function_key,
        args.layer_key.as_deref(),
        args.version_suffix.as_deref(),
    );
    let mut objects = Vec::with_capacity(plans.len());
    for plan in plans {
        let bytes = archive::create(&plan.spec)
            .with_context(|| format!("Failed to build archive '{}'", plan.key))?;
        info!("Built {} ({} bytes)", plan.key, bytes.len());
        objects.push((plan.key, bytes));
    }

    for (region, bucket) in &destinations {
        let store = S3Store::new(region).await;
        storage::upload_all(&store, bucket, &objects)
            .await
            .with_context(|| format!("Failed to upload to {} in {}", bucket, region))?;
    }
    Ok(())
}
