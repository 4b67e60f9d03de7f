//! # fn-push Shared Packaging Arguments
//!
//! File: cli/src/commands/package.rs
//!
//! ## Overview
//!
//! The file selection flags are the same for every subcommand, so they live in
//! one `clap::Args` struct that `aws`, `gcp` and `zip` flatten into their own
//! arguments. This module also turns those flags (plus configured defaults)
//! into the `PackageSpec` consumed by `common::archive`, and formats object
//! keys.
//!
//! Precedence for every field: command line, then configuration file, then the
//! built-in default.
//!
use crate::common::archive::{PackageSpec, RemovalOrder};
use crate::core::config::PackageConfig;
use crate::core::error::{FnPushError, Result};
use anyhow::anyhow;
use clap::Args;

/// File selection and archive layout flags.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageArgs {
    /// The path to the function code and node_modules. Defaults to ".".
    #[arg(short = 'p', long, alias = "inputPath")]
    pub input_path: Option<String>,

    /// Glob defining what to bundle. Repeat for several globs. Defaults to "**".
    #[arg(short, long)]
    pub include: Vec<String>,

    /// Glob defining what not to bundle. Repeat for several globs.
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Optional directory inside the zip to place the files under.
    #[arg(long, alias = "rootDir")]
    pub root_dir: Option<String>,

    /// Add a `node_modules` symlink pointing at the layer's modules under /opt/.
    #[arg(short = 'n', long, alias = "symlinkNodeModules")]
    pub symlink_node_modules: bool,

    /// Symlink target, relative to /opt/. Defaults to "nodejs/node_modules".
    #[arg(long)]
    pub symlink_target: Option<String>,

    /// Remove excluded files by swapping in the last entry, which reorders the
    /// remaining entries.
    #[arg(long)]
    pub unstable_exclude_order: bool,
}

impl PackageArgs {
    /// Merges these flags with configured defaults into a `PackageSpec`.
    pub fn to_spec(&self, config: &PackageConfig) -> Result<PackageSpec> {
        let defaults = PackageSpec::default();
        let symlink_target = self
            .symlink_target
            .clone()
            .or_else(|| config.symlink_target.clone())
            .unwrap_or(defaults.symlink_target);
        if symlink_target.starts_with('/') {
            return Err(anyhow!(FnPushError::ArgumentParsing(format!(
                "--symlink-target '{}' must be relative to /opt/",
                symlink_target
            ))));
        }

        Ok(PackageSpec {
            base_path: self
                .input_path
                .clone()
                .or_else(|| config.input_path.clone())
                .unwrap_or(defaults.base_path),
            include: non_empty(&self.include)
                .or_else(|| config.include.clone())
                .unwrap_or(defaults.include),
            exclude: non_empty(&self.exclude)
                .or_else(|| config.exclude.clone())
                .unwrap_or(defaults.exclude),
            root_dir: self
                .root_dir
                .clone()
                .or_else(|| config.root_dir.clone())
                .unwrap_or(defaults.root_dir),
            symlink_node_modules: self.symlink_node_modules,
            symlink_target,
            removal: if self.unstable_exclude_order {
                RemovalOrder::SwapRemove
            } else {
                RemovalOrder::Stable
            },
        })
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

/// Object key for an archive: `<key>.zip`, or `<key>-<suffix>.zip` when a
/// version suffix is given.
pub fn archive_key(key: &str, version_suffix: Option<&str>) -> String {
    match version_suffix.filter(|s| !s.is_empty()) {
        Some(suffix) => format!("{}-{}.zip", key, suffix),
        None => format!("{}.zip", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        package: PackageArgs,
    }

    fn parse(args: &[&str]) -> PackageArgs {
        TestCli::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
            .package
    }

    #[test]
    fn test_archive_key() {
        assert_eq!(archive_key("fn/handler", None), "fn/handler.zip");
        assert_eq!(archive_key("fn/handler", Some("")), "fn/handler.zip");
        assert_eq!(archive_key("fn/handler", Some("1.2.3")), "fn/handler-1.2.3.zip");
    }

    #[test]
    fn test_parse_repeated_globs() {
        let args = parse(&["-i", "*.js", "--include", "lib/**", "-e", "**/*.map", "-n"]);
        assert_eq!(args.include, vec!["*.js", "lib/**"]);
        assert_eq!(args.exclude, vec!["**/*.map"]);
        assert!(args.symlink_node_modules);
        assert_eq!(args.input_path, None);
    }

    #[test]
    fn test_defaults_without_flags_or_config() {
        let spec = parse(&[]).to_spec(&PackageConfig::default()).unwrap();
        assert_eq!(spec, PackageSpec::default());
    }

    #[test]
    fn test_config_fills_missing_flags() {
        let config = PackageConfig {
            input_path: Some("dist".into()),
            exclude: Some(vec!["*.md".into()]),
            root_dir: Some("nodejs".into()),
            ..Default::default()
        };
        let spec = parse(&["-p", "build"]).to_spec(&config).unwrap();
        assert_eq!(spec.base_path, "build");
        assert_eq!(spec.include, vec!["**"]);
        assert_eq!(spec.exclude, vec!["*.md"]);
        assert_eq!(spec.root_dir, "nodejs");
    }

    #[test]
    fn test_flags_replace_configured_globs() {
        let config = PackageConfig {
            include: Some(vec!["**/*.js".into()]),
            ..Default::default()
        };
        let spec = parse(&["-i", "index.js"]).to_spec(&config).unwrap();
        assert_eq!(spec.include, vec!["index.js"]);
    }

    #[test]
    fn test_camel_case_flag_aliases() {
        let args = parse(&["--inputPath", "dist", "--rootDir", "nodejs", "--symlinkNodeModules"]);
        assert_eq!(args.input_path.as_deref(), Some("dist"));
        assert_eq!(args.root_dir.as_deref(), Some("nodejs"));
        assert!(args.symlink_node_modules);
    }

    #[test]
    fn test_unstable_exclude_order_flag() {
        let spec = parse(&["--unstable-exclude-order"])
            .to_spec(&PackageConfig::default())
            .unwrap();
        assert_eq!(spec.removal, RemovalOrder::SwapRemove);
    }

    #[test]
    fn test_absolute_symlink_target_rejected() {
        let result = parse(&["--symlink-target", "/opt/nodejs"]).to_spec(&PackageConfig::default());
        assert!(result.is_err());
    }
}
