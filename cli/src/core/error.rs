//! # fn-push Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout fn-push. Packaging is
//! all-or-nothing: either a complete archive is produced or the operation stops
//! with an error naming the step that failed.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `FnPushError`: A custom error enum using `thiserror`, one variant per failing step
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error types cover:
//! - Configuration and argument errors
//! - Filesystem errors (working directory, stat, open, read)
//! - Archive writer errors
//! - Object store upload errors
//!
//! Glob compile/expansion problems are *not* represented here. They are logged
//! as warnings and selection carries on with whatever matched.
//!
//! ## Examples
//!
//! ```rust
//! // Find out which step of the packaging pipeline failed
//! match archive::create(&spec) {
//!     Ok(bytes) => upload(bytes),
//!     Err(e) => match e.downcast_ref::<FnPushError>() {
//!         Some(FnPushError::Stat { path, .. }) => eprintln!("could not stat {}", path),
//!         _ => return Err(e),
//!     },
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for fn-push.
#[derive(Error, Debug)]
pub enum FnPushError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),

    #[error("Failed to resolve the current working directory: {source}")]
    WorkingDirectory {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to stat '{path}': {source}")]
    Stat {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write archive entry '{entry}': {source}")]
    ArchiveWrite {
        entry: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to finalize archive: {source}")]
    ArchiveFinish {
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Upload of '{key}' to bucket '{bucket}' failed: {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
