//! # API Facade
//!
//! The API layer is a **thin facade** over validation and the command layer. It is
//! the single entry point for transports: hand it a parsed JSON envelope, get back a
//! [`CommandOutcome`] or a [`VaultError`].
//!
//! ## Pipeline
//!
//! ```text
//! JSON envelope ──► validate_command ──► Command ──► commands::*::run ──► CommandOutcome
//!                        │                                  │
//!                        ▼                                  ▼
//!              VaultError::Validation            VaultError::{AlreadyExists, EscapesRoot, ...}
//! ```
//!
//! Validation failures happen before any I/O. Mutation failures are returned as
//! they are raised; nothing is retried here.
//!
//! ## Generic Over DocumentStore
//!
//! `VaultApi<S: DocumentStore>` is generic over the storage backend:
//! - Production: `VaultApi<FsStore>`
//! - Testing: `VaultApi<MemStore>`

use serde_json::Value;

use crate::commands;
use crate::config::VaultConfig;
use crate::error::Result;
use crate::model::{Command, CommandOutcome, Operation};
use crate::store::fs::FsStore;
use crate::store::DocumentStore;
use crate::validation::validate_command;

pub struct VaultApi<S: DocumentStore> {
    store: S,
}

impl VaultApi<FsStore> {
    pub fn from_config(config: &VaultConfig) -> Self {
        Self::new(FsStore::from_config(config))
    }
}

impl<S: DocumentStore> VaultApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates an envelope without touching the vault.
    pub fn validate(&self, envelope: &Value) -> Result<Command> {
        validate_command(envelope).map_err(|failure| {
            tracing::warn!(
                action = ?failure.action,
                violations = failure.violations.len(),
                error = %failure,
                "rejected command"
            );
            failure.into()
        })
    }

    /// Validates and applies an envelope.
    pub fn execute(&self, envelope: &Value) -> Result<CommandOutcome> {
        let command = self.validate(envelope)?;
        self.apply(&command)
    }

    /// Applies an already validated command.
    pub fn apply(&self, command: &Command) -> Result<CommandOutcome> {
        let trace_id = command.trace_id();
        let result = match &command.operation {
            Operation::NoteCreate {
                path,
                title,
                body_md,
            } => commands::create_note::run(&self.store, path, title, body_md),
            Operation::NoteAppend {
                path,
                body_md,
                placement,
            } => commands::append_note::run(&self.store, path, body_md, placement),
            Operation::NoteUpdate { path, body_md } => {
                commands::update_note::run(&self.store, path, body_md)
            }
            Operation::TaskCreate {
                path,
                task_text,
                due,
                tags,
            } => commands::create_task::run(&self.store, path, task_text, *due, tags),
            Operation::TaskToggle {
                path,
                task_text,
                task_state,
            } => commands::toggle_task::run(&self.store, path, task_text.as_deref(), *task_state),
        };

        match result {
            Ok(record_id) => {
                tracing::info!(
                    action = %command.action(),
                    path = command.path(),
                    record_id = %record_id,
                    trace_id = trace_id.unwrap_or("-"),
                    "applied command"
                );
                Ok(CommandOutcome {
                    action: command.action(),
                    record_id,
                    trace_id: trace_id.map(String::from),
                })
            }
            Err(err) => {
                tracing::warn!(
                    action = %command.action(),
                    path = command.path(),
                    kind = ?err.kind(),
                    trace_id = trace_id.unwrap_or("-"),
                    error = %err,
                    "command failed"
                );
                Err(err)
            }
        }
    }
}
