//! # fn-push Archive Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! This module builds the ZIP archives that get uploaded as function code or
//! layers. It exposes one entry point, `create`, which takes a `PackageSpec`
//! and returns the finished archive bytes.
//!
//! ## Architecture
//!
//! - **`file_list`**: Expands include/exclude globs into the ordered list of
//!   relative paths to package.
//! - **`assembler`**: Writes those files (and an optional `node_modules`
//!   symlink) into an in-memory ZIP archive.
//!
//! Both halves share a single `FsView`, resolved once per call, so paths that
//! matched during listing resolve to the same files during assembly.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{self, PackageSpec};
//!
//! # fn run() -> crate::core::error::Result<()> {
//! let spec = PackageSpec {
//!     base_path: "dist".into(),
//!     exclude: vec!["**/*.map".into()],
//!     ..Default::default()
//! };
//! let bytes = archive::create(&spec)?;
//! println!("Built archive of {} bytes", bytes.len());
//! # Ok(())
//! # }
//! ```
//!
use crate::common::fs::view::FsView; // Shared by listing and assembly
use crate::core::error::Result;
use tracing::info;

pub mod assembler;
pub mod file_list;

pub use file_list::RemovalOrder;

/// Default target of the synthetic symlink, relative to `/opt/`. This is
/// where AWS Lambda mounts a Node.js layer's modules.
pub const DEFAULT_SYMLINK_TARGET: &str = "nodejs/node_modules";

/// Everything needed to build one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// Directory to package, resolved against the current directory.
    pub base_path: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Directory inside the archive to place every file under. Empty for none.
    pub root_dir: String,
    /// Add a `node_modules` symlink entry pointing at `/opt/<symlink_target>`.
    pub symlink_node_modules: bool,
    pub symlink_target: String,
    pub removal: RemovalOrder,
}

impl Default for PackageSpec {
    fn default() -> Self {
        Self {
            base_path: ".".to_string(),
            include: vec!["**".to_string()],
            exclude: Vec::new(),
            root_dir: String::new(),
            symlink_node_modules: false,
            symlink_target: DEFAULT_SYMLINK_TARGET.to_string(),
            removal: RemovalOrder::default(),
        }
    }
}

/// Resolves `base_path` and lists the files `spec` selects.
pub fn build_file_list(spec: &PackageSpec) -> Result<Vec<String>> {
    let view = FsView::resolve(&spec.base_path)?;
    Ok(file_list::build_file_list(
        &view,
        &spec.include,
        &spec.exclude,
        spec.removal,
    ))
}

/// # Create Archive (`create`)
///
/// Builds the archive described by `spec`: resolves `base_path` once, lists
/// the selected files and writes them into an in-memory ZIP.
///
/// ## Arguments
///
/// * `spec` - Base path, globs and layout options for this archive.
///
/// ## Returns
///
/// * `Result<Vec<u8>>` - The sealed archive bytes. Nothing is written to disk.
///
/// ## Errors
///
/// Returns an `Err` if the current directory cannot be read
/// (`FnPushError::WorkingDirectory`) or if assembly fails for any listed file
/// (see `assembler::assemble`).
pub fn create(spec: &PackageSpec) -> Result<Vec<u8>> {
    let view = FsView::resolve(&spec.base_path)?;
    create_in(&view, spec)
}

/// Builds the archive described by `spec` against an already resolved view.
pub fn create_in(view: &FsView, spec: &PackageSpec) -> Result<Vec<u8>> {
    let files = file_list::build_file_list(view, &spec.include, &spec.exclude, spec.removal);
    info!(
        "Packaging {} files from {}",
        files.len(),
        view.root().display()
    );
    let symlink_target = spec
        .symlink_node_modules
        .then_some(spec.symlink_target.as_str());
    assembler::assemble(view, &files, &spec.root_dir, symlink_target)
}
