#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn vaultcmd(vault: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("vaultcmd"));
    cmd.env_remove("VAULTCMD_VAULT_ROOT")
        .env_remove("VAULTCMD_ATOMIC_WRITES")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(vault.path().join("no-such-config.toml"))
        .arg("--vault")
        .arg(vault.path());
    cmd
}

#[test]
fn test_apply_from_stdin_creates_note() {
    let vault = TempDir::new().unwrap();

    vaultcmd(&vault)
        .arg("apply")
        .write_stdin(
            r#"{"type":"obsidian.command","action":"note.create",
                "payload":{"path":"Projects/Alpha.md","title":"Alpha","body_md":"Kickoff",
                           "meta":{"trace_id":"trace-0001"}}}"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""record_id":"Projects/Alpha.md""#))
        .stdout(predicate::str::contains(r#""trace_id":"trace-0001""#));

    let content = fs::read_to_string(vault.path().join("Projects/Alpha.md")).unwrap();
    assert_eq!(content, "# Alpha\n\nKickoff\n");
}

#[test]
fn test_apply_from_file_appends_task() {
    let vault = TempDir::new().unwrap();
    let input = vault.path().join("cmd.json");
    fs::write(
        &input,
        r#"{"action":"task.create","payload":{"path":"Inbox.md","task_text":"Call bank"}}"#,
    )
    .unwrap();

    vaultcmd(&vault)
        .arg("apply")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Inbox.md#Call bank"));

    let content = fs::read_to_string(vault.path().join("Inbox.md")).unwrap();
    assert_eq!(content, "- [ ] Call bank\n");
}

#[test]
fn test_validation_failure_exits_1_with_violations() {
    let vault = TempDir::new().unwrap();

    vaultcmd(&vault)
        .arg("apply")
        .write_stdin(r#"{"action":"task.toggle","payload":{"path":"Projects/Alpha.md"}}"#)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""kind":"validation""#))
        .stdout(predicate::str::contains(r#""field":"task_state""#));
}

#[test]
fn test_mutation_failure_exits_2() {
    let vault = TempDir::new().unwrap();
    fs::write(vault.path().join("a.md"), "exists\n").unwrap();

    vaultcmd(&vault)
        .arg("apply")
        .write_stdin(r#"{"action":"note.create","payload":{"path":"a.md","title":"A","body_md":"b"}}"#)
        .assert()
        .code(2)
        .stdout(predicate::str::contains(r#""kind":"already_exists""#));

    assert_eq!(
        fs::read_to_string(vault.path().join("a.md")).unwrap(),
        "exists\n"
    );
}

#[test]
fn test_validate_prints_canonical_command() {
    let vault = TempDir::new().unwrap();

    vaultcmd(&vault)
        .arg("validate")
        .write_stdin(
            r#"{"action":"task.create","payload":{"path":"a.md","task_text":"x","tags":[" t "]}}"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""tags":["t"]"#))
        .stdout(predicate::str::contains(r#""type":"obsidian.command""#));

    assert!(!vault.path().join("a.md").exists());
}

#[test]
fn test_invalid_json_is_a_usage_error() {
    let vault = TempDir::new().unwrap();

    vaultcmd(&vault)
        .arg("apply")
        .write_stdin("not json")
        .assert()
        .code(64)
        .stderr(predicate::str::contains("envelope is not valid JSON"));
}

#[test]
fn test_config_shows_vault_override() {
    let vault = TempDir::new().unwrap();

    vaultcmd(&vault)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("vault_root"))
        .stdout(predicate::str::contains("atomic_writes = true"));
}

#[test]
fn test_verbose_logs_loaded_config_to_stderr() {
    let vault = TempDir::new().unwrap();

    vaultcmd(&vault)
        .arg("-v")
        .arg("config")
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded config"));
}
