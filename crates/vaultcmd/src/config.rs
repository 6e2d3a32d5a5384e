//! # Configuration
//!
//! Vaultcmd configuration is loaded with [`confique`], layering environment
//! variables over an optional TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Programmatic overrides**: e.g. the CLI's `--vault` flag.
//! 2. **Environment variables**: `VAULTCMD_VAULT_ROOT`, `VAULTCMD_ATOMIC_WRITES`.
//! 3. **Config file**: an explicit path, or `config.toml` in the OS config
//!    directory for `vaultcmd` (via the `directories` crate).
//! 4. **Compiled defaults**.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `vault_root` | `vault` | Directory holding the Markdown documents |
//! | `atomic_writes` | `true` | Write via temp file + rename instead of in place |

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, VaultError};

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration for vaultcmd, stored in `config.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// Root directory of the vault. Relative paths resolve against the working directory.
    #[config(env = "VAULTCMD_VAULT_ROOT", default = "vault")]
    pub vault_root: PathBuf,

    /// Replace documents through a temp file and an atomic rename.
    #[config(env = "VAULTCMD_ATOMIC_WRITES", default = true)]
    pub atomic_writes: bool,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            vault_root: PathBuf::from("vault"),
            atomic_writes: true,
        }
    }
}

impl VaultConfig {
    /// Loads env, then `file` (or the default config file when `None`), then defaults.
    /// A config file that does not exist is skipped.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        match file {
            Some(path) => builder = builder.file(path),
            None => {
                if let Some(path) = default_config_path() {
                    builder = builder.file(path);
                }
            }
        }
        let config = builder
            .load()
            .map_err(|e| VaultError::Config(e.to_string()))?;
        tracing::debug!(vault_root = %config.vault_root.display(), "loaded configuration");
        Ok(config)
    }

    pub fn with_vault_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.vault_root = root.into();
        self
    }
}

/// `<os config dir>/vaultcmd/config.toml`, when the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "vaultcmd").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
