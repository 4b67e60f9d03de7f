//! # fn-push Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by the packaging pipeline.
//!
//! - **`view`**: `FsView`, a read-only view rooted at the package's base
//!   directory. Glob expansion and archive assembly both resolve paths through
//!   it.
//!

/// Rooted, read-only filesystem view (`FsView`).
pub mod view;
