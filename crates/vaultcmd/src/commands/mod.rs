//! # Command Layer
//!
//! This module contains the **document mutation logic** of vaultcmd. Each action
//! lives in its own submodule as a `run` function over a [`DocumentStore`].
//!
//! ## Shape of a Command
//!
//! Every command follows the same sequence, inside [`DocumentStore::locked`]:
//!
//! 1. Read the whole document (or start from no lines).
//! 2. Compute the new line sequence in memory.
//! 3. Write the whole document back.
//!
//! A failure in step 1 or 2 returns before step 3, so a rejected command never
//! leaves a partially edited document behind.
//!
//! ## What Commands Do NOT Do
//!
//! - **Validation**: inputs arrive as a validated [`crate::model::Command`].
//! - **Retries**: conflicts such as "already exists" are returned as-is.
//! - **Output formatting**: they return the record identifier and nothing else.
//!
//! ## Record Identifiers
//!
//! - Note actions: the vault-relative path.
//! - `task.create`: `<path>#<task_text>`.
//! - `task.toggle`: `<path>#<task_text>@<state>`.
//!
//! ## Command Modules
//!
//! - [`create_note`]: Create a new note, refusing to overwrite
//! - [`update_note`]: Replace a note's content
//! - [`append_note`]: Add content at the top, bottom, or under a heading
//! - [`create_task`]: Append a checkbox task
//! - [`toggle_task`]: Flip a task between open and done

use crate::model::TaskState;

#[cfg(doc)]
use crate::store::DocumentStore;

pub mod append_note;
pub mod create_note;
pub mod create_task;
pub mod toggle_task;
pub mod update_note;

pub fn task_record_id(path: &str, text: &str) -> String {
    format!("{}#{}", path, text)
}

pub fn toggled_record_id(path: &str, text: &str, state: TaskState) -> String {
    format!("{}#{}@{}", path, text, state)
}

/// The checkbox line for `text` in the given state, without annotations.
pub fn task_line(state: TaskState, text: &str) -> String {
    format!("{}{}", state.marker(), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids() {
        assert_eq!(task_record_id("a.md", "Ship"), "a.md#Ship");
        assert_eq!(
            toggled_record_id("a.md", "Ship", TaskState::Done),
            "a.md#Ship@done"
        );
    }

    #[test]
    fn task_lines() {
        assert_eq!(task_line(TaskState::Open, "Ship"), "- [ ] Ship");
        assert_eq!(task_line(TaskState::Done, "Ship"), "- [x] Ship");
    }
}
