//! # Path Resolution
//!
//! Maps a vault-relative document path onto the filesystem without ever leaving the
//! vault root. Checks run in a fixed order, and the first failure wins:
//!
//! 1. **Not vault-relative**: absolute paths (`/etc/x.md`, `C:\x.md`) are rejected.
//! 2. **Wrong suffix**: the path must end in `.md` (case-insensitive).
//! 3. **Escapes root**: any `..` segment is rejected outright, and the deepest
//!    existing ancestor is canonicalized so a symlink pointing outside the vault is
//!    caught before anything is created behind it. A symlinked document must
//!    point at an existing file inside the vault; dangling links are rejected.
//!
//! Resolution creates missing parent directories. It never creates the document.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, VaultError};
use crate::model::MD_SUFFIX;

pub fn has_md_suffix(path: &str) -> bool {
    path.to_ascii_lowercase().ends_with(MD_SUFFIX)
}

/// String-level checks shared by every store: rules 1 and 2 plus the `..` part of
/// rule 3. Returns the path as normalized relative components.
pub fn check_relative(rel: &str) -> Result<PathBuf> {
    let path = Path::new(rel);
    if rel.starts_with('/') || rel.starts_with('\\') || path.has_root() || path.is_absolute() {
        return Err(VaultError::NotVaultRelative(rel.to_string()));
    }
    if !has_md_suffix(rel) {
        return Err(VaultError::WrongSuffix(rel.to_string()));
    }

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => return Err(VaultError::EscapesRoot(rel.to_string())),
            Component::RootDir | Component::Prefix(_) => {
                return Err(VaultError::NotVaultRelative(rel.to_string()))
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        return Err(VaultError::WrongSuffix(rel.to_string()));
    }
    Ok(normalized)
}

/// Resolves `rel` under `root`, creating the root and any missing parents.
///
/// The returned path is absolute and canonical up to its final component, which
/// may not exist yet.
pub fn resolve(root: &Path, rel: &str) -> Result<PathBuf> {
    let relative = check_relative(rel)?;

    fs::create_dir_all(root)?;
    let root = fs::canonicalize(root)?;
    let target = root.join(&relative);

    let parent = target
        .parent()
        .ok_or_else(|| VaultError::EscapesRoot(rel.to_string()))?;

    // Check the part that already exists before creating anything beneath it.
    let existing = deepest_existing(parent);
    let existing = fs::canonicalize(existing)?;
    if !existing.starts_with(&root) {
        tracing::warn!(path = rel, "rejected path resolving outside the vault");
        return Err(VaultError::EscapesRoot(rel.to_string()));
    }

    fs::create_dir_all(parent)?;
    let parent = fs::canonicalize(parent)?;
    if !parent.starts_with(&root) {
        return Err(VaultError::EscapesRoot(rel.to_string()));
    }

    let file_name = target
        .file_name()
        .ok_or_else(|| VaultError::WrongSuffix(rel.to_string()))?;
    let resolved = parent.join(file_name);

    // The document itself may be a symlink, possibly dangling.
    let is_link = fs::symlink_metadata(&resolved)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false);
    if is_link {
        let inside = fs::canonicalize(&resolved)
            .map(|real| real.starts_with(&root))
            .unwrap_or(false);
        if !inside {
            tracing::warn!(path = rel, "rejected symlinked document outside the vault");
            return Err(VaultError::EscapesRoot(rel.to_string()));
        }
    }

    tracing::debug!(path = rel, resolved = %resolved.display(), "resolved document path");
    Ok(resolved)
}

fn deepest_existing(path: &Path) -> &Path {
    let mut current = path;
    while !current.exists() {
        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }
    current
}
