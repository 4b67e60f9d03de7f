//! # fn-push Rooted Filesystem View
//!
//! File: cli/src/common/fs/view.rs
//!
//! ## Overview
//!
//! `FsView` pins a base directory once and interprets every later path
//! operation relative to it. Both glob expansion (`archive::file_list`) and
//! archive assembly (`archive::assembler`) go through the same view, so a
//! relative path that matched during listing is guaranteed to open the same
//! file during assembly.
//!
//! ## Resolution Rule
//!
//! - `"."` resolves to the current working directory.
//! - Anything else is joined onto the current working directory. An absolute
//!   path therefore stays absolute.
//!
//! Failing to read the current working directory is fatal for the whole
//! pipeline and surfaces as `FnPushError::WorkingDirectory`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::view::FsView;
//!
//! # fn run() -> crate::core::error::Result<()> {
//! let view = FsView::resolve("dist")?;
//! for rel in view.regular_files() {
//!     let meta = view.metadata(&rel)?;
//!     println!("{} ({} bytes)", rel, meta.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{FnPushError, Result};
use std::fs::{self, File, Metadata};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir; // Sorted recursive directory traversal

/// A read-only view of the filesystem rooted at an absolute directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsView {
    root: PathBuf,
}

impl FsView {
    /// # Resolve Base Path (`resolve`)
    ///
    /// Resolves `path` against the process's current working directory.
    ///
    /// ## Arguments
    ///
    /// * `path` - The base path. `.` means the current directory; any other
    ///   value is joined onto it, so absolute paths stay absolute.
    ///
    /// ## Returns
    ///
    /// * `Result<FsView>` - A view rooted at the resolved directory. The
    ///   directory is not required to exist yet.
    ///
    /// ## Errors
    ///
    /// Returns `FnPushError::WorkingDirectory` if the current directory cannot
    /// be determined.
    pub fn resolve(path: &str) -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|source| FnPushError::WorkingDirectory { source })?;
        Ok(Self::resolve_from(&cwd, path))
    }

    /// Resolves `path` against an explicit working directory.
    pub fn resolve_from(cwd: &Path, path: &str) -> Self {
        let root = if path == "." {
            cwd.to_path_buf()
        } else {
            cwd.join(path)
        };
        debug!("Resolved base path '{}' to {}", path, root.display());
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a `/`-separated path relative to the root.
    pub fn join(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Every regular file reachable under the root, as `/`-separated relative
    /// paths.
    ///
    /// The walk is depth-first with entries sorted by file name, so the order
    /// is stable across runs. Symlinks are included when they point at a
    /// regular file; symlinked directories are not descended into.
    /// Unreadable entries and non UTF-8 names are skipped with a warning.
    pub fn regular_files(&self) -> Vec<String> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable path under {}: {}", self.root.display(), e);
                    continue;
                }
            };
            let file_type = entry.file_type();
            let is_file = file_type.is_file()
                || (file_type.is_symlink()
                    && fs::metadata(entry.path()).map(|m| m.is_file()).unwrap_or(false));
            if !is_file {
                continue;
            }
            match relative_slash_path(&self.root, entry.path()) {
                Some(rel) => files.push(rel),
                None => warn!("Skipping path with non UTF-8 name: {}", entry.path().display()),
            }
        }
        files
    }

    /// Stats the file at `rel`, following symlinks.
    pub fn metadata(&self, rel: &str) -> Result<Metadata> {
        fs::metadata(self.join(rel)).map_err(|source| {
            FnPushError::Stat {
                path: rel.to_string(),
                source,
            }
            .into()
        })
    }

    pub fn open(&self, rel: &str) -> Result<File> {
        File::open(self.join(rel)).map_err(|source| {
            FnPushError::Open {
                path: rel.to_string(),
                source,
            }
            .into()
        })
    }
}

/// `path` relative to `root`, with components joined by `/` whatever the host
/// separator is.
fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            _ => return None,
        }
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_dot_is_cwd() {
        let cwd = Path::new("/work/project");
        assert_eq!(FsView::resolve_from(cwd, ".").root(), cwd);
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let cwd = Path::new("/work/project");
        assert_eq!(
            FsView::resolve_from(cwd, "../dist").root(),
            Path::new("/work/project/../dist")
        );
        assert_eq!(
            FsView::resolve_from(cwd, "/srv/fn").root(),
            Path::new("/srv/fn")
        );
    }

    #[test]
    fn test_resolve_uses_current_dir() {
        let view = FsView::resolve(".").unwrap();
        assert_eq!(view.root(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_regular_files_sorted_and_slash_separated() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("lib/util")).unwrap();
        fs::write(root.join("index.js"), "a").unwrap();
        fs::write(root.join("lib/util/strings.js"), "b").unwrap();
        fs::write(root.join("lib/a.js"), "c").unwrap();
        fs::create_dir(root.join("empty")).unwrap();

        let view = FsView::resolve_from(Path::new("/"), root.to_str().unwrap());
        assert_eq!(
            view.regular_files(),
            vec!["index.js", "lib/a.js", "lib/util/strings.js"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_regular_files_follows_file_symlinks_only() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("real")).unwrap();
        fs::write(root.join("real/file.txt"), "x").unwrap();
        std::os::unix::fs::symlink(root.join("real/file.txt"), root.join("link.txt")).unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("linkdir")).unwrap();
        std::os::unix::fs::symlink(root.join("missing"), root.join("dangling")).unwrap();

        let view = FsView::resolve_from(Path::new("/"), root.to_str().unwrap());
        assert_eq!(view.regular_files(), vec!["link.txt", "real/file.txt"]);
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let temp_dir = tempdir().unwrap();
        let view = FsView::resolve_from(temp_dir.path(), "does-not-exist");
        assert!(view.regular_files().is_empty());
    }

    #[test]
    fn test_stat_and_open_errors_name_the_step() {
        let temp_dir = tempdir().unwrap();
        let view = FsView::resolve_from(temp_dir.path(), ".");

        let err = view.metadata("nope.txt").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FnPushError>(),
            Some(FnPushError::Stat { path, .. }) if path == "nope.txt"
        ));

        let err = view.open("nope.txt").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FnPushError>(),
            Some(FnPushError::Open { .. })
        ));
    }
}
