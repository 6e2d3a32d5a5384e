//! # Storage Layer
//!
//! Documents are plain Markdown files under a vault root. The [`DocumentStore`]
//! trait hides whether those files live on disk or in memory.
//!
//! ## Line Model
//!
//! Stores exchange documents as line sequences:
//! - Reading splits on `\n` and drops a trailing `\r` from each line.
//! - Writing joins with `\n` and ends a non-empty document with one newline.
//!
//! ## Read-Modify-Write
//!
//! Every command reads the whole document, edits it in memory and writes it back.
//! [`DocumentStore::locked`] runs that sequence while holding a per-document lock
//! so two commands against the same file cannot interleave. The filesystem store
//! additionally writes through a temp file and an atomic rename, so a crash never
//! leaves a half-written document.
//!
//! ## Implementations
//!
//! - [`fs::FsStore`]: production store rooted at the configured vault directory.
//! - [`memory::MemStore`]: for testing command logic without touching disk.

use crate::error::Result;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Abstract interface for document storage.
///
/// Every method takes a vault-relative path and applies the same safety rules as
/// [`crate::paths::check_relative`].
pub trait DocumentStore {
    /// Resolve the real location of a document.
    fn resolve(&self, rel: &str) -> Result<PathBuf>;

    /// Read a document as lines. Returns `Ok(None)` when it does not exist.
    fn read_lines(&self, rel: &str) -> Result<Option<Vec<String>>>;

    /// Replace the whole document with `lines`.
    fn write_lines(&self, rel: &str, lines: &[String]) -> Result<()>;

    fn exists(&self, rel: &str) -> Result<bool> {
        Ok(self.read_lines(rel)?.is_some())
    }

    /// Run `f` while no other command may touch the same document.
    fn locked<R>(&self, rel: &str, f: impl FnOnce() -> Result<R>) -> Result<R> {
        let _ = rel;
        f()
    }
}

pub fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(String::from).collect()
}

pub fn join_lines(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut content = lines.join("\n");
    content.push('\n');
    content
}
