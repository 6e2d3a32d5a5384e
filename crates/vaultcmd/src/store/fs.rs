use super::{join_lines, split_lines, DocumentStore};
use crate::config::VaultConfig;
use crate::error::Result;
use crate::paths;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

type LockTable = Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>;

// Keyed by resolved path so every store in the process shares one lock per file.
static DOCUMENT_LOCKS: Lazy<LockTable> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Filesystem store rooted at the vault directory.
pub struct FsStore {
    root: PathBuf,
    atomic_writes: bool,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            atomic_writes: true,
        }
    }

    pub fn from_config(config: &VaultConfig) -> Self {
        Self::new(config.vault_root.clone()).with_atomic_writes(config.atomic_writes)
    }

    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn write_atomic(&self, target: &Path, content: &str) -> Result<()> {
        let dir = target.parent().unwrap_or(&self.root);
        let tmp_path = dir.join(format!(".vaultcmd-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content)?;
        if let Err(err) = fs::rename(&tmp_path, target) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }
        Ok(())
    }
}

impl DocumentStore for FsStore {
    fn resolve(&self, rel: &str) -> Result<PathBuf> {
        paths::resolve(&self.root, rel)
    }

    fn read_lines(&self, rel: &str) -> Result<Option<Vec<String>>> {
        let path = self.resolve(rel)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(split_lines(&content)))
    }

    fn write_lines(&self, rel: &str, lines: &[String]) -> Result<()> {
        let path = self.resolve(rel)?;
        let content = join_lines(lines);
        if self.atomic_writes {
            self.write_atomic(&path, &content)?;
        } else {
            fs::write(&path, content)?;
        }
        tracing::debug!(path = rel, lines = lines.len(), "wrote document");
        Ok(())
    }

    fn locked<R>(&self, rel: &str, f: impl FnOnce() -> Result<R>) -> Result<R> {
        let key = self.resolve(rel)?;
        let entry = {
            let mut table = DOCUMENT_LOCKS.lock().unwrap_or_else(|e| e.into_inner());
            table.entry(key.clone()).or_default().clone()
        };

        let result = {
            // A panic in another command leaves no partial state worth protecting.
            let _guard = entry.lock().unwrap_or_else(|e| e.into_inner());
            f()
        };

        let mut table = DOCUMENT_LOCKS.lock().unwrap_or_else(|e| e.into_inner());
        // Only the table and this call still hold the entry: nobody is waiting.
        if Arc::strong_count(&entry) == 2 {
            table.remove(&key);
        }
        result
    }
}
