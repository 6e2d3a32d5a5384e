//! JSON rendering for command results.
//!
//! Success prints the outcome object. Failure prints
//! `{"error": {"kind", "message", "violations"?}}` so callers can branch on `kind`
//! without parsing messages.

use serde_json::{json, Value};
use std::process::ExitCode;
use vaultcmd::error::VaultError;
use vaultcmd::model::CommandOutcome;

pub const EXIT_VALIDATION: u8 = 1;
pub const EXIT_MUTATION: u8 = 2;
pub const EXIT_USAGE: u8 = 64;

pub fn outcome_value(outcome: &CommandOutcome) -> Value {
    json!(outcome)
}

pub fn error_value(err: &VaultError) -> Value {
    let mut body = json!({
        "kind": err.kind(),
        "message": err.to_string(),
    });
    if let VaultError::Validation(failure) = err {
        body["violations"] = json!(failure.violations);
    }
    json!({ "error": body })
}

pub fn exit_code(err: &VaultError) -> ExitCode {
    if err.is_validation() {
        ExitCode::from(EXIT_VALIDATION)
    } else {
        ExitCode::from(EXIT_MUTATION)
    }
}

pub fn print_json(value: &Value) -> ExitCode {
    println!("{}", value);
    ExitCode::SUCCESS
}

pub fn print_error(err: &VaultError) -> ExitCode {
    println!("{}", error_value(err));
    exit_code(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultcmd::model::Action;
    use vaultcmd::validation::validate_command;

    #[test]
    fn outcome_shape() {
        let outcome = CommandOutcome {
            action: Action::TaskCreate,
            record_id: "a.md#x".into(),
            trace_id: Some("trace-0001".into()),
        };
        assert_eq!(
            outcome_value(&outcome),
            json!({"action": "task.create", "record_id": "a.md#x", "trace_id": "trace-0001"})
        );
    }

    #[test]
    fn validation_errors_list_violations() {
        let failure =
            validate_command(&json!({"action": "task.toggle", "payload": {"path": "a.md"}}))
                .unwrap_err();
        let value = error_value(&VaultError::Validation(failure));

        assert_eq!(value["error"]["kind"], "validation");
        assert_eq!(value["error"]["violations"][0]["field"], "task_state");
        assert_eq!(value["error"]["violations"][0]["reason"], "missing");
    }

    #[test]
    fn mutation_errors_have_no_violations() {
        let value = error_value(&VaultError::AlreadyExists("a.md".into()));
        assert_eq!(value["error"]["kind"], "already_exists");
        assert_eq!(value["error"]["message"], "Document already exists: a.md");
        assert!(value["error"].get("violations").is_none());
    }
}
