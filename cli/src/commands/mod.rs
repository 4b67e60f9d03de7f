//! # fn-push Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the `fn-push` CLI and makes them
//! accessible to the main entry point (`main.rs`).
//!
//! ## Commands
//!
//! - `aws`: Package and upload to S3, optionally splitting out a Lambda layer
//! - `gcp`: Package and upload to Cloud Storage
//! - `zip_file`: Package into a local file (`fn-push zip`)
//!
//! Each command flattens the shared `package::PackageArgs` for file selection
//! and defines its own handler.
//!

/// Package and upload to S3.
pub mod aws;
/// Package and upload to Google Cloud Storage.
pub mod gcp;
/// Shared file selection flags and key naming.
pub mod package;
/// Package into a local zip file.
pub mod zip_file;
