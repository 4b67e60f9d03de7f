//! # fn-push File List Builder (`common::archive::file_list`)
//!
//! File: cli/src/common/archive/file_list.rs
//!
//! ## Overview
//!
//! Turns ordered include/exclude glob lists into the ordered list of relative
//! file paths that will be packaged.
//!
//! ## Selection Rules
//!
//! 1. Each include pattern, in order, is expanded against the regular files of
//!    the view. All matches are appended to an accumulator. A file matching
//!    several include patterns is listed several times; nothing is deduplicated.
//! 2. The result starts as a copy of the accumulator.
//! 3. For each exclude pattern, every accumulator entry is tested against it and
//!    each match removes the first remaining occurrence of that value from the
//!    result.
//!
//! Patterns are matched against `/`-separated relative paths. `*` stays within
//! one path segment and `**` spans any number of segments, so `*.js` only picks
//! up files at the top of the base directory while `**/*.js` picks up all of
//! them.
//!
//! A pattern that fails to compile is logged and skipped. An include pattern
//! that matches nothing is logged and otherwise ignored.
//!
use crate::common::fs::view::FsView; // Source of candidate paths
use globset::{GlobBuilder, GlobMatcher}; // Extended glob matching (`**`, `{a,b}`, classes)
use tracing::{debug, info, warn};

/// How excluded entries are taken out of the result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemovalOrder {
    /// Shift later entries down; the remaining entries keep their order.
    #[default]
    Stable,
    /// Move the last entry into the removed slot and truncate. Cheaper, but
    /// the order of the remaining entries changes.
    SwapRemove,
}

/// Compiles a glob with `/` treated as a segment boundary.
pub fn compile_glob(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
}

/// # Build File List (`build_file_list`)
///
/// Builds the ordered list of relative paths to package.
///
/// ## Arguments
///
/// * `view` - Rooted view of the base directory.
/// * `include` - Include globs; their order decides accumulation order.
/// * `exclude` - Exclude globs; any match removes the entry.
/// * `removal` - How removed entries are taken out of the list.
///
/// ## Returns
///
/// * `Vec<String>` - `/`-separated paths of regular files under `view`. A file
///   matched by several include globs appears once per match unless excluded.
///
/// ## Errors
///
/// None. Invalid globs and include globs without matches are logged with
/// `warn!` and skipped.
pub fn build_file_list(
    view: &FsView,
    include: &[String],
    exclude: &[String],
    removal: RemovalOrder,
) -> Vec<String> {
    let candidates = view.regular_files();
    debug!(
        "Found {} regular files under {}",
        candidates.len(),
        view.root().display()
    );

    let mut matches: Vec<String> = Vec::new();
    for pattern in include {
        let matcher = match compile_glob(pattern) {
            Ok(matcher) => matcher,
            Err(e) => {
                warn!("Failed to get files for glob '{}': {}", pattern, e);
                continue;
            }
        };
        let before = matches.len();
        matches.extend(
            candidates
                .iter()
                .filter(|candidate| matcher.is_match(candidate.as_str()))
                .cloned(),
        );
        if matches.len() == before {
            warn!("Include glob '{}' matched no files", pattern);
        } else {
            debug!(
                "Include glob '{}' matched {} files",
                pattern,
                matches.len() - before
            );
        }
    }

    let mut results = matches.clone();
    for pattern in exclude {
        let matcher = match compile_glob(pattern) {
            Ok(matcher) => matcher,
            Err(e) => {
                warn!("Error while checking files against exclude glob '{}': {}", pattern, e);
                continue;
            }
        };
        for candidate in matches.iter().filter(|m| matcher.is_match(m.as_str())) {
            if let Some(index) = results.iter().position(|r| r == candidate) {
                info!("Removing: {}", candidate);
                match removal {
                    RemovalOrder::Stable => {
                        results.remove(index);
                    }
                    RemovalOrder::SwapRemove => {
                        results.swap_remove(index);
                    }
                }
            }
        }
    }

    results
}
