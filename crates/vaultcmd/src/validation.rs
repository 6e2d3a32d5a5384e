//! # Command Validation
//!
//! Turns an untyped JSON envelope into a [`Command`], or a [`ValidationFailure`]
//! listing every problem found. Validation never stops at the first error: a caller
//! that forgets both `title` and `body_md` hears about both.
//!
//! ## Required Fields
//!
//! | Action        | Required                                              |
//! |---------------|-------------------------------------------------------|
//! | `note.create` | `path`, `title`, `body_md`                            |
//! | `note.append` | `path`, `body_md`, plus `heading` for `after_heading` |
//! | `note.update` | `path`, `body_md`                                     |
//! | `task.create` | `path`, `task_text`                                   |
//! | `task.toggle` | `path`, `task_state`                                  |
//!
//! A field counts as missing when absent, `null`, or blank. Independently of the
//! action, `path` must end in `.md`, `tags` must be unique and non-blank, `due` must
//! be an ISO 8601 date, and `meta` keys must be 8–200 characters long.
//!
//! Enumerated fields (`action`, `position`, `task_state`) with unknown values are
//! reported as [`ViolationReason::UnsupportedValue`], never as missing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::model::{
    Action, Command, Meta, Operation, Placement, Position, TaskState, COMMAND_TYPE,
};
use crate::paths::has_md_suffix;
use crate::tags::{normalize_tags, TagError};

const META_MIN_LEN: usize = 8;
const META_MAX_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationReason {
    Missing,
    UnsupportedValue,
    Invalid,
    DuplicateTag,
    BlankTag,
    WrongSuffix,
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub reason: ViolationReason,
    pub message: String,
}

/// Every constraint a rejected envelope broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub action: Option<Action>,
    pub violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    /// Names of the fields reported missing, in the order they were checked.
    pub fn missing_fields(&self) -> Vec<&str> {
        self.violations
            .iter()
            .filter(|v| v.reason == ViolationReason::Missing)
            .map(|v| v.field.as_str())
            .collect()
    }

    pub fn has(&self, field: &str, reason: ViolationReason) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.reason == reason)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        let missing = self.missing_fields();
        if !missing.is_empty() {
            let action = self.action.map(|a| a.as_str()).unwrap_or("command");
            parts.push(format!(
                "missing required fields for {}: {}",
                action,
                missing.join(", ")
            ));
        }
        for v in self
            .violations
            .iter()
            .filter(|v| v.reason != ViolationReason::Missing)
        {
            parts.push(format!("{}: {}", v.field, v.message));
        }
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationFailure {}

#[derive(Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn push(&mut self, field: &str, reason: ViolationReason, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field: field.to_string(),
            reason,
            message: message.into(),
        });
    }

    fn has(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// Returns the value when it is present and not blank; otherwise records it
    /// as missing unless the field already failed for another reason.
    fn require(&mut self, field: &str, value: Option<String>) -> Option<String> {
        match value {
            Some(s) if !s.trim().is_empty() => Some(s),
            _ => {
                self.missing(field);
                None
            }
        }
    }

    fn require_some<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing(field);
        }
        value
    }

    fn missing(&mut self, field: &str) {
        if !self.has(field) {
            self.push(field, ViolationReason::Missing, "field required");
        }
    }
}

/// Payload fields after type checks, before the per-action contract is applied.
#[derive(Debug, Default)]
struct RawPayload {
    vault: Option<String>,
    path: Option<String>,
    heading: Option<String>,
    position: Position,
    title: Option<String>,
    body_md: Option<String>,
    task_text: Option<String>,
    task_state: Option<TaskState>,
    due: Option<NaiveDate>,
    tags: Vec<String>,
    meta: Meta,
}

impl RawPayload {
    fn read(map: &Map<String, Value>, v: &mut Violations) -> Self {
        let path = string_field(map, "path", v).filter(|p| {
            if p.trim().is_empty() || has_md_suffix(p) {
                true
            } else {
                v.push("path", ViolationReason::WrongSuffix, "path must end with .md");
                false
            }
        });

        let position = match string_field(map, "position", v) {
            None => Position::default(),
            Some(s) => Position::from_wire(&s).unwrap_or_else(|| {
                v.push(
                    "position",
                    ViolationReason::UnsupportedValue,
                    format!("unsupported position '{}'", s),
                );
                Position::default()
            }),
        };

        let task_state = string_field(map, "task_state", v).and_then(|s| {
            let state = TaskState::from_wire(&s);
            if state.is_none() {
                v.push(
                    "task_state",
                    ViolationReason::UnsupportedValue,
                    format!("unsupported task_state '{}'", s),
                );
            }
            state
        });

        let due = string_field(map, "due", v).and_then(|s| {
            let date = parse_due(&s);
            if date.is_none() {
                v.push(
                    "due",
                    ViolationReason::Invalid,
                    format!("'{}' is not an ISO 8601 date", s),
                );
            }
            date
        });

        Self {
            vault: string_field(map, "vault", v),
            path,
            heading: string_field(map, "heading", v),
            position,
            title: string_field(map, "title", v),
            body_md: string_field(map, "body_md", v),
            task_text: string_field(map, "task_text", v),
            task_state,
            due,
            tags: read_tags(map, v),
            meta: read_meta(map, v),
        }
    }
}

/// Validates an `obsidian.command` envelope.
///
/// Pure: no filesystem access happens here, so a rejected command never touches
/// the vault.
pub fn validate_command(envelope: &Value) -> Result<Command, ValidationFailure> {
    let mut v = Violations::default();

    let Some(obj) = envelope.as_object() else {
        v.push("envelope", ViolationReason::Invalid, "must be a JSON object");
        return Err(ValidationFailure {
            action: None,
            violations: v.0,
        });
    };

    match obj.get("type") {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) if s == COMMAND_TYPE => {}
        Some(other) => v.push(
            "type",
            ViolationReason::UnsupportedValue,
            format!("expected '{}', got {}", COMMAND_TYPE, other),
        ),
    }

    let action = match obj.get("action") {
        None | Some(Value::Null) => {
            v.missing("action");
            None
        }
        Some(Value::String(s)) => {
            let action = Action::from_wire(s);
            if action.is_none() {
                v.push(
                    "action",
                    ViolationReason::UnsupportedValue,
                    format!("unsupported action '{}'", s),
                );
            }
            action
        }
        Some(_) => {
            v.push("action", ViolationReason::Invalid, "must be a string");
            None
        }
    };

    let empty = Map::new();
    let payload = match obj.get("payload") {
        None | Some(Value::Null) => &empty,
        Some(Value::Object(map)) => map,
        Some(_) => {
            v.push("payload", ViolationReason::Invalid, "must be an object");
            &empty
        }
    };

    let raw = RawPayload::read(payload, &mut v);
    let vault = raw.vault.clone();
    let meta = raw.meta.clone();
    let operation = action.and_then(|action| build_operation(action, raw, &mut v));

    match operation {
        Some(operation) if v.0.is_empty() => Ok(Command {
            vault,
            meta,
            operation,
        }),
        _ => Err(ValidationFailure {
            action,
            violations: v.0,
        }),
    }
}

fn build_operation(action: Action, raw: RawPayload, v: &mut Violations) -> Option<Operation> {
    let path = v.require("path", raw.path);

    match action {
        Action::NoteCreate => {
            let title = v.require("title", raw.title);
            let body_md = v.require("body_md", raw.body_md);
            Some(Operation::NoteCreate {
                path: path?,
                title: title?,
                body_md: body_md?,
            })
        }
        Action::NoteAppend => {
            let body_md = v.require("body_md", raw.body_md);
            let placement = match raw.position {
                Position::Top => Some(Placement::Top),
                Position::Bottom => Some(Placement::Bottom),
                Position::AfterHeading => v
                    .require("heading", raw.heading)
                    .map(Placement::AfterHeading),
            };
            Some(Operation::NoteAppend {
                path: path?,
                body_md: body_md?,
                placement: placement?,
            })
        }
        Action::NoteUpdate => {
            let body_md = v.require("body_md", raw.body_md);
            Some(Operation::NoteUpdate {
                path: path?,
                body_md: body_md?,
            })
        }
        Action::TaskCreate => {
            let task_text = v.require("task_text", raw.task_text);
            Some(Operation::TaskCreate {
                path: path?,
                task_text: task_text?,
                due: raw.due,
                tags: raw.tags,
            })
        }
        Action::TaskToggle => {
            let task_state = v.require_some("task_state", raw.task_state);
            Some(Operation::TaskToggle {
                path: path?,
                task_text: raw.task_text.filter(|t| !t.trim().is_empty()),
                task_state: task_state?,
            })
        }
    }
}

fn string_field(map: &Map<String, Value>, field: &str, v: &mut Violations) -> Option<String> {
    match map.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            v.push(field, ViolationReason::Invalid, "must be a string");
            None
        }
    }
}

fn read_tags(map: &Map<String, Value>, v: &mut Violations) -> Vec<String> {
    let items = match map.get("tags") {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            v.push("tags", ViolationReason::Invalid, "must be a list of strings");
            return Vec::new();
        }
    };

    let mut tags = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(s) => tags.push(s.to_string()),
            None => {
                v.push("tags", ViolationReason::Invalid, "must be a list of strings");
                return Vec::new();
            }
        }
    }

    match normalize_tags(&tags) {
        Ok(tags) => tags,
        Err(err) => {
            let reason = match err {
                TagError::Duplicate(_) => ViolationReason::DuplicateTag,
                TagError::Blank => ViolationReason::BlankTag,
            };
            v.push("tags", reason, err.to_string());
            Vec::new()
        }
    }
}

fn read_meta(map: &Map<String, Value>, v: &mut Violations) -> Meta {
    let fields = match map.get("meta") {
        None | Some(Value::Null) => return Meta::default(),
        Some(Value::Object(fields)) => fields,
        Some(_) => {
            v.push("meta", ViolationReason::Invalid, "must be an object");
            return Meta::default();
        }
    };

    let mut bounded = |key: &str| {
        let name = format!("meta.{}", key);
        let value = match fields.get(key) {
            None | Some(Value::Null) => return None,
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                v.push(&name, ViolationReason::Invalid, "must be a string");
                return None;
            }
        };
        let len = value.chars().count();
        if (META_MIN_LEN..=META_MAX_LEN).contains(&len) {
            Some(value)
        } else {
            v.push(
                &name,
                ViolationReason::OutOfRange,
                format!(
                    "length must be between {} and {}, got {}",
                    META_MIN_LEN, META_MAX_LEN, len
                ),
            );
            None
        }
    };

    Meta {
        idempotency_key: bounded("idempotency_key"),
        trace_id: bounded("trace_id"),
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_due(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(action: &str, payload: Value) -> Value {
        json!({"type": "obsidian.command", "action": action, "payload": payload})
    }

    fn full_payload() -> Value {
        json!({
            "path": "Projects/Alpha.md",
            "heading": "Log",
            "title": "Alpha",
            "body_md": "Some text",
            "task_text": "Ship it",
            "task_state": "done",
        })
    }

    fn without(field: &str) -> Value {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove(field);
        payload
    }

    #[test]
    fn accepts_the_append_after_heading_example() {
        let cmd = validate_command(&envelope(
            "note.append",
            json!({
                "path": "Daily/2025-08-21.md",
                "position": "after_heading",
                "heading": "Standup",
                "body_md": "- [ ] Review PR #214",
                "meta": {"idempotency_key": "day-2025-08-21-standup-pr214"}
            }),
        ))
        .unwrap();

        assert_eq!(cmd.action(), Action::NoteAppend);
        assert_eq!(
            cmd.meta.idempotency_key.as_deref(),
            Some("day-2025-08-21-standup-pr214")
        );
        assert_eq!(
            cmd.operation,
            Operation::NoteAppend {
                path: "Daily/2025-08-21.md".into(),
                body_md: "- [ ] Review PR #214".into(),
                placement: Placement::AfterHeading("Standup".into()),
            }
        );
    }

    #[test]
    fn toggle_without_state_names_task_state() {
        let err = validate_command(&envelope(
            "task.toggle",
            json!({"path": "Projects/Alpha.md"}),
        ))
        .unwrap_err();
        assert_eq!(err.missing_fields(), vec!["task_state"]);
        assert_eq!(
            err.to_string(),
            "missing required fields for task.toggle: task_state"
        );
    }

    #[test]
    fn each_required_field_is_reported_alone() {
        let cases = [
            ("note.create", "path"),
            ("note.create", "title"),
            ("note.create", "body_md"),
            ("note.append", "path"),
            ("note.append", "body_md"),
            ("note.update", "path"),
            ("note.update", "body_md"),
            ("task.create", "path"),
            ("task.create", "task_text"),
            ("task.toggle", "path"),
            ("task.toggle", "task_state"),
        ];
        for (action, field) in cases {
            let err = validate_command(&envelope(action, without(field))).unwrap_err();
            assert_eq!(err.missing_fields(), vec![field], "{} without {}", action, field);
            assert_eq!(err.violations.len(), 1, "{} without {}", action, field);
        }
    }

    #[test]
    fn after_heading_requires_heading() {
        let mut payload = without("heading");
        payload["position"] = json!("after_heading");
        let err = validate_command(&envelope("note.append", payload)).unwrap_err();
        assert_eq!(err.missing_fields(), vec!["heading"]);
    }

    #[test]
    fn bottom_append_ignores_missing_heading() {
        let cmd = validate_command(&envelope("note.append", without("heading"))).unwrap();
        match cmd.operation {
            Operation::NoteAppend { placement, .. } => assert_eq!(placement, Placement::Bottom),
            other => panic!("unexpected operation {:?}", other),
        }
    }

    #[test]
    fn collects_all_missing_fields() {
        let err = validate_command(&envelope("note.create", json!({}))).unwrap_err();
        assert_eq!(err.missing_fields(), vec!["path", "title", "body_md"]);
        assert_eq!(err.action, Some(Action::NoteCreate));
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let err = validate_command(&envelope(
            "note.update",
            json!({"path": "a.md", "body_md": "   "}),
        ))
        .unwrap_err();
        assert_eq!(err.missing_fields(), vec!["body_md"]);
    }

    #[test]
    fn wrong_suffix_fails_for_every_action() {
        for action in Action::ALL {
            let mut payload = full_payload();
            payload["path"] = json!("Projects/Alpha.txt");
            let err = validate_command(&envelope(action.as_str(), payload)).unwrap_err();
            assert!(err.has("path", ViolationReason::WrongSuffix), "{}", action);
            assert!(err.missing_fields().is_empty(), "{}", action);
        }
    }

    #[test]
    fn suffix_check_is_case_insensitive() {
        let mut payload = full_payload();
        payload["path"] = json!("Projects/Alpha.MD");
        assert!(validate_command(&envelope("note.update", payload)).is_ok());
    }

    #[test]
    fn unknown_action_is_unsupported_not_missing() {
        let err = validate_command(&envelope("note.delete", full_payload())).unwrap_err();
        assert!(err.has("action", ViolationReason::UnsupportedValue));
        assert_eq!(err.action, None);
    }

    #[test]
    fn unknown_task_state_is_not_double_reported() {
        let mut payload = full_payload();
        payload["task_state"] = json!("blocked");
        let err = validate_command(&envelope("task.toggle", payload)).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.has("task_state", ViolationReason::UnsupportedValue));
    }

    #[test]
    fn unknown_position_is_unsupported() {
        let mut payload = full_payload();
        payload["position"] = json!("middle");
        let err = validate_command(&envelope("note.append", payload)).unwrap_err();
        assert!(err.has("position", ViolationReason::UnsupportedValue));
    }

    #[test]
    fn wrong_type_literal_is_rejected() {
        let mut env = envelope("note.update", full_payload());
        env["type"] = json!("github.command");
        let err = validate_command(&env).unwrap_err();
        assert!(err.has("type", ViolationReason::UnsupportedValue));
    }

    #[test]
    fn missing_type_defaults_to_obsidian_command() {
        let env = json!({"action": "note.update", "payload": full_payload()});
        assert_eq!(validate_command(&env).unwrap().kind(), "obsidian.command");
    }

    #[test]
    fn tags_are_trimmed_in_order() {
        let mut payload = full_payload();
        payload["tags"] = json!([" work", "alpha ", "q3"]);
        let cmd = validate_command(&envelope("task.create", payload)).unwrap();
        match cmd.operation {
            Operation::TaskCreate { tags, .. } => assert_eq!(tags, vec!["work", "alpha", "q3"]),
            other => panic!("unexpected operation {:?}", other),
        }
    }

    #[test]
    fn duplicate_and_blank_tags_fail() {
        let mut dup = full_payload();
        dup["tags"] = json!(["a", "b", "a"]);
        let err = validate_command(&envelope("task.create", dup)).unwrap_err();
        assert!(err.has("tags", ViolationReason::DuplicateTag));

        let mut blank = full_payload();
        blank["tags"] = json!(["a", " "]);
        let err = validate_command(&envelope("note.update", blank)).unwrap_err();
        assert!(err.has("tags", ViolationReason::BlankTag));
    }

    #[test]
    fn non_string_tags_are_invalid() {
        let mut payload = full_payload();
        payload["tags"] = json!(["a", 3]);
        let err = validate_command(&envelope("task.create", payload)).unwrap_err();
        assert!(err.has("tags", ViolationReason::Invalid));
    }

    #[test]
    fn due_is_normalized() {
        let mut payload = full_payload();
        payload["due"] = json!("2025-08-21T09:30:00+02:00");
        let cmd = validate_command(&envelope("task.create", payload)).unwrap();
        match cmd.operation {
            Operation::TaskCreate { due, .. } => {
                assert_eq!(due, NaiveDate::from_ymd_opt(2025, 8, 21))
            }
            other => panic!("unexpected operation {:?}", other),
        }
    }

    #[test]
    fn bad_due_is_invalid() {
        let mut payload = full_payload();
        payload["due"] = json!("next tuesday");
        let err = validate_command(&envelope("task.create", payload)).unwrap_err();
        assert!(err.has("due", ViolationReason::Invalid));
    }

    #[test]
    fn meta_lengths_are_bounded() {
        let mut payload = full_payload();
        payload["meta"] = json!({"idempotency_key": "short", "trace_id": "x".repeat(201)});
        let err = validate_command(&envelope("note.update", payload)).unwrap_err();
        assert!(err.has("meta.idempotency_key", ViolationReason::OutOfRange));
        assert!(err.has("meta.trace_id", ViolationReason::OutOfRange));
    }

    #[test]
    fn trace_id_is_carried() {
        let mut payload = full_payload();
        payload["meta"] = json!({"trace_id": "trace-0001"});
        let cmd = validate_command(&envelope("note.update", payload)).unwrap();
        assert_eq!(cmd.trace_id(), Some("trace-0001"));
    }

    #[test]
    fn wrong_json_types_are_invalid() {
        let err = validate_command(&envelope(
            "note.update",
            json!({"path": 42, "body_md": ["x"]}),
        ))
        .unwrap_err();
        assert!(err.has("path", ViolationReason::Invalid));
        assert!(err.has("body_md", ViolationReason::Invalid));
        assert!(err.missing_fields().is_empty());
    }

    #[test]
    fn non_object_envelope_is_invalid() {
        let err = validate_command(&json!("note.create")).unwrap_err();
        assert!(err.has("envelope", ViolationReason::Invalid));
    }

    #[test]
    fn toggle_keeps_optional_text() {
        let cmd = validate_command(&envelope(
            "task.toggle",
            json!({"path": "a.md", "task_state": "open"}),
        ))
        .unwrap();
        assert_eq!(
            cmd.operation,
            Operation::TaskToggle {
                path: "a.md".into(),
                task_text: None,
                task_state: TaskState::Open,
            }
        );
    }
}
