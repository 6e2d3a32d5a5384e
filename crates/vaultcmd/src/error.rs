use serde::Serialize;
use thiserror::Error;

use crate::model::TaskState;
use crate::validation::ValidationFailure;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Invalid command: {0}")]
    Validation(ValidationFailure),

    #[error("Document already exists: {0}")]
    AlreadyExists(String),

    #[error("Path is not vault-relative: {0}")]
    NotVaultRelative(String),

    #[error("Path must end with .md: {0}")]
    WrongSuffix(String),

    #[error("Path escapes the vault root: {0}")]
    EscapesRoot(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Matching task not found in {path}: {text} (requested {state})")]
    TaskNotFound {
        path: String,
        text: String,
        state: TaskState,
    },

    #[error("task_text is required to toggle a task in {0}")]
    TaskTextRequired(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Stable, machine-readable classification of a [`VaultError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    AlreadyExists,
    NotVaultRelative,
    WrongSuffix,
    EscapesRoot,
    NotFound,
    AmbiguousOrMissingTask,
    Io,
    Serialization,
    Config,
}

impl VaultError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::Validation(_) => ErrorKind::Validation,
            VaultError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            VaultError::NotVaultRelative(_) => ErrorKind::NotVaultRelative,
            VaultError::WrongSuffix(_) => ErrorKind::WrongSuffix,
            VaultError::EscapesRoot(_) => ErrorKind::EscapesRoot,
            VaultError::NotFound(_) => ErrorKind::NotFound,
            VaultError::TaskNotFound { .. } | VaultError::TaskTextRequired(_) => {
                ErrorKind::AmbiguousOrMissingTask
            }
            VaultError::Io(_) => ErrorKind::Io,
            VaultError::Serialization(_) => ErrorKind::Serialization,
            VaultError::Config(_) => ErrorKind::Config,
        }
    }

    /// True for failures raised before any I/O happened.
    pub fn is_validation(&self) -> bool {
        matches!(self, VaultError::Validation(_))
    }
}

impl From<ValidationFailure> for VaultError {
    fn from(failure: ValidationFailure) -> Self {
        VaultError::Validation(failure)
    }
}

pub type Result<T> = std::result::Result<T, VaultError>;
