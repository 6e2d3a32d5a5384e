use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vaultcmd::api::VaultApi;
use vaultcmd::config::VaultConfig;

use super::render;
use super::setup::{parse_cli, Cli, Commands};

pub fn run() -> Result<ExitCode> {
    let cli = parse_cli();
    init_tracing(&cli);

    let config = load_config(&cli)?;
    tracing::debug!(
        vault_root = %config.vault_root.display(),
        atomic_writes = config.atomic_writes,
        "loaded config"
    );
    let api = VaultApi::from_config(&config);

    match cli.command {
        Commands::Apply { input } => {
            let envelope = read_envelope(&input)?;
            Ok(match api.execute(&envelope) {
                Ok(outcome) => render::print_json(&render::outcome_value(&outcome)),
                Err(err) => render::print_error(&err),
            })
        }
        Commands::Validate { input } => {
            let envelope = read_envelope(&input)?;
            Ok(match api.validate(&envelope) {
                Ok(command) => render::print_json(&command.to_envelope()),
                Err(err) => render::print_error(&err),
            })
        }
        Commands::Config => {
            let text = toml::to_string_pretty(&config).context("failed to render config")?;
            print!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(cli: &Cli) -> Result<VaultConfig> {
    let config = VaultConfig::load(cli.config.as_deref())?;
    Ok(match &cli.vault {
        Some(root) => config.with_vault_root(root.clone()),
        None => config,
    })
}

fn read_envelope(input: &str) -> Result<Value> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read envelope from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input))?
    };
    serde_json::from_str(&text).context("envelope is not valid JSON")
}

fn init_tracing(cli: &Cli) {
    let default = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let _ = if cli.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
