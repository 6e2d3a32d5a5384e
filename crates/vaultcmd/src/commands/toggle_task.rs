use super::{task_line, toggled_record_id};
use crate::error::{Result, VaultError};
use crate::model::TaskState;
use crate::store::DocumentStore;

/// Flips the first task line exactly matching `task_text` into `state`.
///
/// Only a line in the opposite state matches, so toggling a task that is already
/// in `state` fails the same way as toggling one that does not exist.
pub fn run<S: DocumentStore>(
    store: &S,
    path: &str,
    task_text: Option<&str>,
    state: TaskState,
) -> Result<String> {
    let text = task_text.ok_or_else(|| VaultError::TaskTextRequired(path.to_string()))?;

    store.locked(path, || {
        let mut lines = store
            .read_lines(path)?
            .ok_or_else(|| VaultError::NotFound(path.to_string()))?;

        let from = task_line(state.opposite(), text);
        let idx = lines
            .iter()
            .position(|line| *line == from)
            .ok_or_else(|| VaultError::TaskNotFound {
                path: path.to_string(),
                text: text.to_string(),
                state,
            })?;

        lines[idx] = task_line(state, text);
        store.write_lines(path, &lines)?;
        tracing::debug!(path, line = idx, %state, "toggled task");
        Ok(toggled_record_id(path, text, state))
    })
}
