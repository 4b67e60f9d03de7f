//! # fn-push CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files. Each `.rs` file in `cli/tests/`
//! is compiled as its own test crate and pulls this module in with `mod common;`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// # Get fn-push Command (`fn_push_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `fn-push` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn fn_push_cmd() -> Command {
    Command::cargo_bin("fn-push").expect("Failed to find fn-push binary for testing")
}

/// # Function Fixture (`function_fixture`)
///
/// Lays out a small Node.js function in a temporary directory:
///
/// ```text
/// handler.js
/// handler.js.map
/// lib/util.js
/// node_modules/left-pad/index.js
/// ```
pub fn function_fixture() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create fixture dir");
    let root = temp_dir.path();
    write(root, "handler.js", "exports.handler = async () => 'ok';\n");
    write(root, "handler.js.map", "{\"version\":3}");
    write(root, "lib/util.js", "module.exports = (s) => s.trim();\n");
    write(root, "node_modules/left-pad/index.js", "module.exports = 'pad';\n");
    temp_dir
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture subdir");
    }
    fs::write(path, content).expect("Failed to write fixture file");
}
