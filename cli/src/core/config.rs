//! # fn-push Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the optional configuration files
//! that provide defaults for the packaging flags. Anything given on the command
//! line wins over what is configured here.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.fn-push.toml` in the current directory or ancestors
//! 2. User-specific `config.toml` in the platform config directory
//! 3. Default values defined in the code
//!
//! The project file search walks upwards from the current directory and stops
//! at the first directory containing `.git`.
//!
//! ## Examples
//!
//! ```toml
//! [package]
//! input_path = "dist"
//! include = ["**"]
//! exclude = ["**/*.map"]
//! root_dir = "nodejs"
//!
//! [aws]
//! regions = ["eu-west-2", "us-east-1"]
//! buckets = ["assets-eu", "assets-us"]
//! ```
//!
use crate::core::error::{FnPushError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub package: PackageConfig,
    #[serde(default)]
    pub aws: AwsConfig,
}

/// Defaults for the file selection and archive layout flags.
///
/// Every field is optional so that a project file only overrides what it sets.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
    /// Directory holding the function code (can use ~). Will be expanded.
    pub input_path: Option<String>,
    /// Include globs.
    pub include: Option<Vec<String>>,
    /// Exclude globs.
    pub exclude: Option<Vec<String>>,
    /// Directory inside the archive to place files under.
    pub root_dir: Option<String>,
    /// Target of the synthetic `node_modules` link, relative to `/opt/`.
    pub symlink_target: Option<String>,
}

/// Default upload destinations for `fn-push aws`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AwsConfig {
    #[serde(default)]
    pub regions: Vec<String>,
    /// Paired with `regions` by index.
    #[serde(default)]
    pub buckets: Vec<String>,
}

const PROJECT_CONFIG_FILENAME: &str = ".fn-push.toml";

/// Loads the effective configuration (user file merged with project file).
///
/// Missing files are not an error; a file that exists but fails to parse or
/// validate is.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "FnPush", "fn-push") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir()
        .map_err(|source| FnPushError::WorkingDirectory { source })?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path: &Path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    Config {
        package: PackageConfig {
            input_path: project.package.input_path.or(user.package.input_path),
            include: project.package.include.or(user.package.include),
            exclude: project.package.exclude.or(user.package.exclude),
            root_dir: project.package.root_dir.or(user.package.root_dir),
            symlink_target: project.package.symlink_target.or(user.package.symlink_target),
        },
        aws: if project.aws.regions.is_empty() && project.aws.buckets.is_empty() {
            user.aws
        } else {
            project.aws
        },
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    if let Some(input_path) = config.package.input_path.as_mut() {
        *input_path = shellexpand::tilde(input_path).into_owned();
        debug!("Expanded input path: {}", input_path);
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(input_path) = &config.package.input_path {
        if input_path.is_empty() {
            return Err(anyhow!(FnPushError::Config(
                "package.input_path cannot be empty.".to_string()
            )));
        }
    }
    if let Some(target) = &config.package.symlink_target {
        if target.starts_with('/') {
            return Err(anyhow!(FnPushError::Config(format!(
                "package.symlink_target '{}' must be relative to /opt/.",
                target
            ))));
        }
    }
    if config.aws.regions.len() != config.aws.buckets.len() {
        return Err(anyhow!(FnPushError::Config(format!(
            "aws.regions has {} entries but aws.buckets has {}; they are paired by index.",
            config.aws.regions.len(),
            config.aws.buckets.len()
        ))));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [package]
            input_path = "~/dist"
            include = ["**/*.js"]
            exclude = ["**/*.map"]
            root_dir = "nodejs"

            [aws]
            regions = ["eu-west-2"]
            buckets = ["my-bucket"]
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.package.input_path.as_deref(), Some("~/dist"));
        assert_eq!(config.package.include, Some(vec!["**/*.js".to_string()]));
        assert_eq!(config.package.exclude, Some(vec!["**/*.map".to_string()]));
        assert_eq!(config.package.root_dir.as_deref(), Some("nodejs"));
        assert_eq!(config.package.symlink_target, None);
        assert_eq!(config.aws.regions, vec!["eu-west-2"]);
        assert_eq!(config.aws.buckets, vec!["my-bucket"]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[package]\nincludes = []\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_project_overrides_user() {
        let user = Config {
            package: PackageConfig {
                input_path: Some("user-dist".into()),
                exclude: Some(vec!["*.md".into()]),
                ..Default::default()
            },
            aws: AwsConfig {
                regions: vec!["us-east-1".into()],
                buckets: vec!["user-bucket".into()],
            },
        };
        let project = Config {
            package: PackageConfig {
                input_path: Some("build".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.package.input_path.as_deref(), Some("build"));
        assert_eq!(merged.package.exclude, Some(vec!["*.md".to_string()]));
        assert_eq!(merged.aws.buckets, vec!["user-bucket"]);
    }

    #[test]
    fn test_merge_without_project() {
        let user = Config {
            package: PackageConfig {
                root_dir: Some("layer".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(merge_configs(user.clone(), None), user);
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            package: PackageConfig {
                input_path: Some("~/fn_code".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        expand_config_paths(&mut config).unwrap();

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.package.input_path.unwrap(),
            home_dir.join("fn_code").to_string_lossy()
        );
    }

    #[test]
    fn test_validate_config_mismatched_destinations() {
        let config = Config {
            aws: AwsConfig {
                regions: vec!["eu-west-1".into(), "eu-west-2".into()],
                buckets: vec!["only-one".into()],
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("paired by index"));
    }

    #[test]
    fn test_validate_config_absolute_symlink_target() {
        let config = Config {
            package: PackageConfig {
                symlink_target: Some("/opt/nodejs".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_find_project_config_stops_at_git() {
        let temp_dir = tempdir().unwrap();
        let repo = temp_dir.path().join("repo");
        let nested = repo.join("packages/fn");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        assert_eq!(find_project_config_path(&nested), None);

        fs::write(repo.join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_path(&nested),
            Some(repo.join(PROJECT_CONFIG_FILENAME))
        );
    }
}
