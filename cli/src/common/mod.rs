//! # fn-push Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! This module is the root of the shared utilities used by the command
//! handlers. It keeps the packaging pipeline and the upload backends apart from
//! the command-line layer (`commands::`) and the core infrastructure (`core::`).
//!
//! ## Architecture
//!
//! - **`fs`**: The rooted filesystem view used to resolve the package's base directory.
//! - **`archive`**: Glob-based file selection and in-memory ZIP assembly.
//! - **`storage`**: The `ObjectStore` trait and its S3 and Cloud Storage implementations.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::{archive, storage};
//! use crate::common::storage::ObjectStore;
//!
//! # async fn run(store: &dyn ObjectStore) -> crate::core::error::Result<()> {
//! let bytes = archive::create(&archive::PackageSpec::default())?;
//! store.put_object("my-bucket", "function.zip", &bytes).await?;
//! # Ok(())
//! # }
//! ```
//!

/// Glob-based file selection and ZIP archive assembly.
pub mod archive;
/// Filesystem helpers (rooted views).
pub mod fs;
/// Object store upload backends.
pub mod storage;
