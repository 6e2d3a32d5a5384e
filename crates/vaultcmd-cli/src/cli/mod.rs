//! # CLI Behavior
//!
//! This is **one possible client** for vaultcmd, not the application itself. The
//! CLI is the only place that knows about stdin, stdout, exit codes and log setup.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Config loading, dispatch to the API facade
//! - `render`: JSON output and exit code mapping

mod commands;
pub mod render;
pub mod setup;

pub use commands::run;
