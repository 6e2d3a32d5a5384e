use chrono::NaiveDate;

use super::{task_line, task_record_id};
use crate::error::Result;
use crate::model::TaskState;
use crate::sections::ensure_trailing_blank;
use crate::store::DocumentStore;
use crate::tags::format_tag;

/// Marker preceding a due date, as understood by the Obsidian Tasks plugin.
pub const DUE_MARKER: &str = "📅";

/// Appends an open task to `path`, creating the document if needed.
pub fn run<S: DocumentStore>(
    store: &S,
    path: &str,
    task_text: &str,
    due: Option<NaiveDate>,
    tags: &[String],
) -> Result<String> {
    store.locked(path, || {
        let mut lines = store.read_lines(path)?.unwrap_or_default();
        ensure_trailing_blank(&mut lines);
        lines.push(annotated_task(task_text, due, tags));
        store.write_lines(path, &lines)?;
        Ok(task_record_id(path, task_text))
    })
}

/// `- [ ] text`, then ` 📅 YYYY-MM-DD` when due, then ` #tag` per tag.
pub fn annotated_task(task_text: &str, due: Option<NaiveDate>, tags: &[String]) -> String {
    let mut line = task_line(TaskState::Open, task_text);
    if let Some(due) = due {
        line.push_str(&format!(" {} {}", DUE_MARKER, due.format("%Y-%m-%d")));
    }
    for tag in tags {
        line.push(' ');
        line.push_str(&format_tag(tag));
    }
    line
}
