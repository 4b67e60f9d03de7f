//! # fn-push ZIP Assembler (`common::archive::assembler`)
//!
//! File: cli/src/common/archive/assembler.rs
//!
//! ## Overview
//!
//! Streams a list of files (and optionally one synthetic symlink entry) into a
//! ZIP archive held entirely in memory.
//!
//! ## Architecture
//!
//! - `EntrySource` describes one entry: a regular file read from the `FsView`,
//!   or a symlink whose payload is supplied directly.
//! - `ZipAssembler` owns the `zip::ZipWriter` over a `Cursor<Vec<u8>>` and
//!   appends entries in the order it is given them.
//! - `assemble` drives the whole sequence and seals the archive.
//!
//! Regular files are deflated and carry their on-disk permission bits and
//! modification time. The symlink entry is stored uncompressed with mode
//! `0777` plus the symlink type bit.
//!
//! Any stat, open, read or writer failure aborts the operation. No partial
//! archive is ever returned.
//!
use crate::common::fs::view::FsView; // Resolves relative paths against the base path
use crate::core::error::{FnPushError, Result};
use chrono::{DateTime, Datelike, Local, Timelike}; // DOS timestamps are local wall-clock time
use std::fs::Metadata;
use std::io::{Cursor, ErrorKind, Read, Write};
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Name of the synthetic symlink entry.
pub const SYMLINK_ENTRY_NAME: &str = "node_modules";

/// Files at or above this size need ZIP64 headers.
const ZIP64_THRESHOLD: u64 = 0xFFFF_FFFF;

/// Chunk size used when streaming file content into the writer.
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// One entry to write into the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySource {
    /// A regular file at `path` (relative to the view), stored as `name`.
    File { path: String, name: String },
    /// A symbolic link called `name` pointing at `target`.
    Symlink { name: String, target: String },
}

impl EntrySource {
    /// A file entry whose in-archive name is `path`, optionally placed under
    /// `root_dir`.
    pub fn file(path: &str, root_dir: &str) -> Self {
        Self::File {
            path: path.to_string(),
            name: archive_name(root_dir, path),
        }
    }

    /// The `node_modules` link pointing at `/opt/<target>`.
    pub fn node_modules_link(target: &str) -> Self {
        Self::Symlink {
            name: SYMLINK_ENTRY_NAME.to_string(),
            target: format!("/opt/{}", target),
        }
    }
}

/// Joins `root_dir` and `rel` with `/`.
///
/// Empty and `.` components of `root_dir` are dropped, so `./layer/` and
/// `layer` name the same directory and an empty or `.` root leaves `rel` as is.
pub fn archive_name(root_dir: &str, rel: &str) -> String {
    let prefix: Vec<&str> = root_dir
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect();
    if prefix.is_empty() {
        rel.to_string()
    } else {
        format!("{}/{}", prefix.join("/"), rel)
    }
}

/// Append-only ZIP writer over an in-memory buffer.
pub struct ZipAssembler<'a> {
    view: &'a FsView,
    writer: ZipWriter<Cursor<Vec<u8>>>,
    entries: usize,
}

impl<'a> ZipAssembler<'a> {
    pub fn new(view: &'a FsView) -> Self {
        Self {
            view,
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            entries: 0,
        }
    }

    /// Writes one entry.
    pub fn append(&mut self, entry: &EntrySource) -> Result<()> {
        match entry {
            EntrySource::File { path, name } => self.append_file(path, name)?,
            EntrySource::Symlink { name, target } => self.append_symlink(name, target)?,
        }
        self.entries += 1;
        Ok(())
    }

    fn append_symlink(&mut self, name: &str, target: &str) -> Result<()> {
        debug!("Adding symlink entry {} -> {}", name, target);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(0o777)
            .last_modified_time(zip_timestamp(Local::now()));
        self.writer
            .add_symlink(name, target, options)
            .map_err(|source| FnPushError::ArchiveWrite {
                entry: name.to_string(),
                source,
            })?;
        Ok(())
    }

    fn append_file(&mut self, path: &str, name: &str) -> Result<()> {
        let metadata = self.view.metadata(path)?;
        debug!("Adding {} as {} ({} bytes)", path, name, metadata.len());
        self.writer
            .start_file(name, file_options(&metadata))
            .map_err(|source| FnPushError::ArchiveWrite {
                entry: name.to_string(),
                source,
            })?;

        let mut source = self.view.open(path)?;
        let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
        loop {
            let read = match source.read(&mut buffer) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(FnPushError::Read {
                        path: path.to_string(),
                        source,
                    }
                    .into())
                }
            };
            self.writer
                .write_all(&buffer[..read])
                .map_err(|source| FnPushError::ArchiveWrite {
                    entry: name.to_string(),
                    source: source.into(),
                })?;
        }
        Ok(())
    }

    /// Writes the central directory and returns the archive bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self
            .writer
            .finish()
            .map_err(|source| FnPushError::ArchiveFinish { source })?;
        debug!("Sealed archive with {} entries", self.entries);
        Ok(cursor.into_inner())
    }
}

/// Entry options for a regular file, derived from its metadata.
fn file_options(metadata: &Metadata) -> SimpleFileOptions {
    let modified = match metadata.modified() {
        Ok(time) => DateTime::<Local>::from(time),
        Err(e) => {
            warn!("Modification time unavailable ({}), using the current time", e);
            Local::now()
        }
    };
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip_timestamp(modified))
        .large_file(metadata.len() >= ZIP64_THRESHOLD);
    with_permissions(options, metadata)
}

#[cfg(unix)]
fn with_permissions(options: SimpleFileOptions, metadata: &Metadata) -> SimpleFileOptions {
    use std::os::unix::fs::PermissionsExt;
    options.unix_permissions(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn with_permissions(options: SimpleFileOptions, metadata: &Metadata) -> SimpleFileOptions {
    if metadata.permissions().readonly() {
        options.unix_permissions(0o444)
    } else {
        options.unix_permissions(0o644)
    }
}

/// ZIP timestamps are local DOS dates with two second resolution and no years
/// before 1980. Out of range times fall back to 1980-01-01.
fn zip_timestamp(time: DateTime<Local>) -> zip::DateTime {
    let year = u16::try_from(time.year()).unwrap_or(0);
    zip::DateTime::from_date_and_time(
        year,
        time.month() as u8,
        time.day() as u8,
        time.hour() as u8,
        time.minute() as u8,
        time.second() as u8,
    )
    .unwrap_or_default()
}

/// # Assemble ZIP Archive (`assemble`)
///
/// Builds an archive from `files` under `view`. Entries are written as
/// `[node_modules link]` (when `symlink_target` is `Some`) followed by one
/// entry per file, in list order.
///
/// ## Arguments
///
/// * `view` - The resolved base path the relative `files` are read from.
/// * `files` - Relative, `/`-separated paths, usually from `build_file_list`.
/// * `root_dir` - Directory inside the archive to place the files under. May be empty.
/// * `symlink_target` - When set, the `node_modules` link points at `/opt/<target>`.
///
/// ## Returns
///
/// * `Result<Vec<u8>>` - The bytes of the sealed archive.
///
/// ## Errors
///
/// Returns an `Err` wrapping an `FnPushError` if:
/// - A file cannot be stat'ed (`Stat`), opened (`Open`) or read (`Read`).
/// - The writer rejects an entry or its content (`ArchiveWrite`).
/// - The central directory cannot be written (`ArchiveFinish`).
pub fn assemble(
    view: &FsView,
    files: &[String],
    root_dir: &str,
    symlink_target: Option<&str>,
) -> Result<Vec<u8>> {
    let mut assembler = ZipAssembler::new(view);
    if let Some(target) = symlink_target {
        assembler.append(&EntrySource::node_modules_link(target))?;
    }
    for path in files {
        assembler.append(&EntrySource::file(path, root_dir))?;
    }
    assembler.finish()
}
