//! # Command Model
//!
//! The wire envelope is deliberately loose: every payload field is optional and the
//! per-action contract lives in [`crate::validation`]. Once validated, a command is a
//! [`Command`] whose [`Operation`] carries exactly the fields its action needs, so an
//! `after_heading` append without a heading, or a note create without a title, cannot
//! be constructed.
//!
//! ```text
//! { "type": "obsidian.command",
//!   "action": "note.append",
//!   "payload": { "path": "Daily/2025-08-21.md",
//!                "position": "after_heading",
//!                "heading": "Standup",
//!                "body_md": "- [ ] Review PR #214",
//!                "meta": { "idempotency_key": "day-2025-08-21-standup-pr214" } } }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// The only accepted value of the envelope's `type` field.
pub const COMMAND_TYPE: &str = "obsidian.command";

/// Suffix every document path must carry (compared case-insensitively).
pub const MD_SUFFIX: &str = ".md";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "note.create")]
    NoteCreate,
    #[serde(rename = "note.append")]
    NoteAppend,
    #[serde(rename = "note.update")]
    NoteUpdate,
    #[serde(rename = "task.create")]
    TaskCreate,
    #[serde(rename = "task.toggle")]
    TaskToggle,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::NoteCreate,
        Action::NoteAppend,
        Action::NoteUpdate,
        Action::TaskCreate,
        Action::TaskToggle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::NoteCreate => "note.create",
            Action::NoteAppend => "note.append",
            Action::NoteUpdate => "note.update",
            Action::TaskCreate => "task.create",
            Action::TaskToggle => "task.toggle",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == value)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where `note.append` places new content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Top,
    #[default]
    Bottom,
    AfterHeading,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Top => "top",
            Position::Bottom => "bottom",
            Position::AfterHeading => "after_heading",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "top" => Some(Position::Top),
            "bottom" => Some(Position::Bottom),
            "after_heading" => Some(Position::AfterHeading),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Open,
    Done,
}

impl TaskState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Open => "open",
            TaskState::Done => "done",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "open" => Some(TaskState::Open),
            "done" => Some(TaskState::Done),
            _ => None,
        }
    }

    /// The checkbox marker written for this state.
    pub fn marker(&self) -> &'static str {
        match self {
            TaskState::Open => "- [ ] ",
            TaskState::Done => "- [x] ",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            TaskState::Open => TaskState::Done,
            TaskState::Done => TaskState::Open,
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque caller-supplied correlation data. Both keys are 8–200 characters when set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl Meta {
    pub fn is_empty(&self) -> bool {
        self.idempotency_key.is_none() && self.trace_id.is_none()
    }
}

/// Placement of appended content. `AfterHeading` always carries its heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Top,
    Bottom,
    AfterHeading(String),
}

impl Placement {
    pub fn position(&self) -> Position {
        match self {
            Placement::Top => Position::Top,
            Placement::Bottom => Position::Bottom,
            Placement::AfterHeading(_) => Position::AfterHeading,
        }
    }
}

/// One variant per [`Action`], holding exactly what that action requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    NoteCreate {
        path: String,
        title: String,
        body_md: String,
    },
    NoteAppend {
        path: String,
        body_md: String,
        placement: Placement,
    },
    NoteUpdate {
        path: String,
        body_md: String,
    },
    TaskCreate {
        path: String,
        task_text: String,
        due: Option<NaiveDate>,
        tags: Vec<String>,
    },
    TaskToggle {
        path: String,
        task_text: Option<String>,
        task_state: TaskState,
    },
}

impl Operation {
    pub fn action(&self) -> Action {
        match self {
            Operation::NoteCreate { .. } => Action::NoteCreate,
            Operation::NoteAppend { .. } => Action::NoteAppend,
            Operation::NoteUpdate { .. } => Action::NoteUpdate,
            Operation::TaskCreate { .. } => Action::TaskCreate,
            Operation::TaskToggle { .. } => Action::TaskToggle,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Operation::NoteCreate { path, .. }
            | Operation::NoteAppend { path, .. }
            | Operation::NoteUpdate { path, .. }
            | Operation::TaskCreate { path, .. }
            | Operation::TaskToggle { path, .. } => path,
        }
    }
}

/// A validated `obsidian.command`. Only [`crate::validation::validate_command`]
/// builds these from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub vault: Option<String>,
    pub meta: Meta,
    pub operation: Operation,
}

impl Command {
    pub fn kind(&self) -> &'static str {
        COMMAND_TYPE
    }

    pub fn action(&self) -> Action {
        self.operation.action()
    }

    pub fn path(&self) -> &str {
        self.operation.path()
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.meta.trace_id.as_deref()
    }

    /// Renders the canonical envelope: trimmed tags, normalized due date and
    /// explicit position, with fields the action ignores left out.
    pub fn to_envelope(&self) -> Value {
        let mut payload = Map::new();
        payload.insert("path".into(), json!(self.path()));
        if let Some(vault) = &self.vault {
            payload.insert("vault".into(), json!(vault));
        }
        match &self.operation {
            Operation::NoteCreate { title, body_md, .. } => {
                payload.insert("title".into(), json!(title));
                payload.insert("body_md".into(), json!(body_md));
            }
            Operation::NoteAppend {
                body_md, placement, ..
            } => {
                payload.insert("body_md".into(), json!(body_md));
                payload.insert("position".into(), json!(placement.position()));
                if let Placement::AfterHeading(heading) = placement {
                    payload.insert("heading".into(), json!(heading));
                }
            }
            Operation::NoteUpdate { body_md, .. } => {
                payload.insert("body_md".into(), json!(body_md));
            }
            Operation::TaskCreate {
                task_text,
                due,
                tags,
                ..
            } => {
                payload.insert("task_text".into(), json!(task_text));
                if let Some(due) = due {
                    payload.insert("due".into(), json!(due.format("%Y-%m-%d").to_string()));
                }
                if !tags.is_empty() {
                    payload.insert("tags".into(), json!(tags));
                }
            }
            Operation::TaskToggle {
                task_text,
                task_state,
                ..
            } => {
                if let Some(text) = task_text {
                    payload.insert("task_text".into(), json!(text));
                }
                payload.insert("task_state".into(), json!(task_state));
            }
        }
        if !self.meta.is_empty() {
            payload.insert("meta".into(), json!(self.meta));
        }

        json!({
            "type": COMMAND_TYPE,
            "action": self.action(),
            "payload": Value::Object(payload),
        })
    }
}

/// What a successful command reports back to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub action: Action,
    pub record_id: String,
    pub trace_id: Option<String>,
}
