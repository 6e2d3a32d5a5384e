//! # Vaultcmd CLI
//!
//! One possible transport for the `vaultcmd` library: it reads an
//! `obsidian.command` envelope as JSON, applies it to the configured vault and
//! prints the outcome as JSON. The binary is intentionally thin; everything that
//! touches the terminal lives in `src/cli/`.
//!
//! ```text
//! $ echo '{"action":"task.create","payload":{"path":"Inbox.md","task_text":"Call bank"}}' \
//!     | vaultcmd --vault ~/notes apply
//! {"action":"task.create","record_id":"Inbox.md#Call bank","trace_id":null}
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: command applied (or validated)
//! - `1`: the envelope failed validation
//! - `2`: the command was valid but could not be applied
//!
//! Logs go to stderr so stdout stays machine-readable. Set `RUST_LOG` or pass
//! `-v` for more detail, `--log-json` for JSON log lines.

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(cli::render::EXIT_USAGE)
        }
    }
}
