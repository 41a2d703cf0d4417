//! GeneVault daemon: entry point for replaying operation scripts against a vault.

mod script;

use anyhow::Context;
use clap::Parser;
use genevault_node::{Vault, VaultConfig};
use genevault_nullables::NullStore;
use genevault_utils::LogFormat;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "genevault-daemon", about = "GeneVault registry daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, global = true, env = "GENEVAULT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "GENEVAULT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "GENEVAULT_LOG_FORMAT")]
    log_format: Option<String>,

    /// Administrative identity allowed to revoke verifiers.
    #[arg(long, global = true, env = "GENEVAULT_ADMIN")]
    admin: Option<String>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a JSON array of operations, printing one result line per operation.
    Run {
        /// Path to the operation script.
        #[arg(long)]
        script: PathBuf,

        /// Snapshot file to load before and save after the run.
        /// Without it the run starts from an empty vault and nothing is written.
        #[arg(long, env = "GENEVAULT_STATE")]
        state: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn parse_log_format(s: &str) -> LogFormat {
    match s.to_lowercase().as_str() {
        "json" => LogFormat::Json,
        _ => LogFormat::Human,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => VaultConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => VaultConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(ref format) = cli.log_format {
        config.log_format = parse_log_format(format);
    }
    if let Some(admin) = cli.admin {
        config.admin = admin.into();
    }

    genevault_utils::init_logging(config.log_format, &config.log_level);

    match cli.command {
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
        Command::Run { script, state } => {
            let source = std::fs::read_to_string(&script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let steps = script::parse(&source)
                .with_context(|| format!("parsing script {}", script.display()))?;

            if let Some(ref state) = state {
                point_config_at(&mut config, state);
            }
            let vault = match state {
                Some(_) => Vault::open(&config).context("opening vault state")?,
                None => Vault::with_store(
                    NullStore::new(),
                    config.params.clone(),
                    config.admin.clone(),
                )
                .context("building vault")?,
            };

            tracing::info!(
                steps = steps.len(),
                admin = %config.admin,
                "replaying operation script"
            );

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for (index, step) in steps.iter().enumerate() {
                let line = script::execute(&vault, index, step);
                serde_json::to_writer(&mut out, &line)?;
                writeln!(out)?;
            }
            out.flush()?;

            if state.is_some() {
                vault.persist(&config).context("saving vault state")?;
            }
            tracing::info!(stats = ?vault.stats(), "script complete");
        }
    }

    Ok(())
}

/// Redirect the snapshot location in `config` to `state`.
fn point_config_at(config: &mut VaultConfig, state: &Path) {
    config.data_dir = match state.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if let Some(name) = state.file_name() {
        config.snapshot_file = name.to_string_lossy().into_owned();
    }
}
