//! # Vaultcmd Architecture
//!
//! Vaultcmd is a **UI-agnostic mutation library** for a vault of Markdown notes. It
//! accepts structured `obsidian.command` envelopes, validates them, and applies the
//! resulting edits to plain `.md` files under a single root directory.
//!
//! The transport (HTTP, a queue, the bundled CLI) is somebody else's problem: the
//! library receives an already-parsed JSON value and returns either a
//! [`model::CommandOutcome`] or a typed [`error::VaultError`].
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - validate → dispatch → CommandOutcome                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Validation (validation.rs, tags.rs, model.rs)              │
//! │  - Raw JSON payload → Command (one variant per action)      │
//! │  - Collects every violation before failing                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, sections.rs)                 │
//! │  - Note create/update/append, task create/toggle            │
//! │  - Pure line-sequence edits plus one read and one write     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, paths.rs)                           │
//! │  - DocumentStore trait                                      │
//! │  - FsStore (production), MemStore (testing)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Documents Are Line Sequences
//!
//! A document has no identity beyond its vault-relative path. Every operation reads
//! the whole file, computes a new line sequence in memory and writes the whole file
//! back. Nothing is cached between commands; the filesystem is the only source of
//! truth.
//!
//! ## Testing Strategy
//!
//! - **Validation**: exhaustive unit tests over the per-action field matrix.
//! - **Sections**: pure functions over `&[String]`, tested without any store.
//! - **Commands**: run against [`store::memory::MemStore`].
//! - **Filesystem**: `tests/` exercises [`store::fs::FsStore`] inside a `TempDir`.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod paths;
pub mod sections;
pub mod store;
pub mod tags;
pub mod validation;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
