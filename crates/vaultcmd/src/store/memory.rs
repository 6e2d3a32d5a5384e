use super::DocumentStore;
use crate::error::{Result, VaultError};
use crate::paths::check_relative;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory document store for testing.
///
/// Applies the same string-level path rules as the filesystem store; symlink
/// checks have nothing to act on here. Uses `RefCell` since commands run on one
/// thread.
#[derive(Default)]
pub struct MemStore {
    docs: RefCell<HashMap<PathBuf, Vec<String>>>,
    simulate_write_error: RefCell<bool>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Seed a document from text, bypassing commands.
    pub fn insert(&self, rel: &str, content: &str) -> Result<()> {
        let key = check_relative(rel)?;
        self.docs
            .borrow_mut()
            .insert(key, super::split_lines(content));
        Ok(())
    }

    /// Document content as it would appear on disk.
    pub fn content(&self, rel: &str) -> Option<String> {
        let key = check_relative(rel).ok()?;
        self.docs
            .borrow()
            .get(&key)
            .map(|lines| super::join_lines(lines))
    }
}

impl DocumentStore for MemStore {
    fn resolve(&self, rel: &str) -> Result<PathBuf> {
        Ok(PathBuf::from("/mem").join(check_relative(rel)?))
    }

    fn read_lines(&self, rel: &str) -> Result<Option<Vec<String>>> {
        let key = check_relative(rel)?;
        Ok(self.docs.borrow().get(&key).cloned())
    }

    fn write_lines(&self, rel: &str, lines: &[String]) -> Result<()> {
        let key = check_relative(rel)?;
        if *self.simulate_write_error.borrow() {
            return Err(VaultError::Io(std::io::Error::other("Simulated write error")));
        }
        self.docs.borrow_mut().insert(key, lines.to_vec());
        Ok(())
    }
}
