//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nlterm_core::config::{self, Config};
use nlterm_core::dialect::Dialect;
use nlterm_core::interrupt;

mod commands;

#[derive(Parser)]
#[command(name = "nlterm")]
#[command(version)]
#[command(about = "Natural-language terminal: type shell commands or plain English")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Working directory the session starts in (default: current directory)
    #[arg(long, default_value = ".")]
    root: String,

    /// Override the shell dialect from config (bash, cmd, powershell)
    #[arg(long, value_parser = parse_dialect)]
    dialect: Option<Dialect>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run one line through the pipeline and print the result
    Exec {
        /// The command or natural-language request to run
        #[arg(short, long)]
        command: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

fn parse_dialect(s: &str) -> Result<Dialect, String> {
    Dialect::from_id(s).ok_or_else(|| format!("unknown dialect '{s}' (bash, cmd, powershell)"))
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_file_logging().context("init logging")?;
    interrupt::init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("load config")?;
    if let Some(dialect) = cli.dialect {
        config.dialect = dialect;
    }

    let root = resolve_root(&cli.root)?;

    let Some(command) = cli.command else {
        // default to the interactive session
        return commands::session::run(&config, root).await;
    };

    match command {
        Commands::Exec { command } => commands::exec::run(&config, root, &command).await,
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

fn resolve_root(root: &str) -> Result<PathBuf> {
    let path = PathBuf::from(root);
    std::fs::canonicalize(&path)
        .with_context(|| format!("root directory not accessible: {}", path.display()))
}

/// Routes tracing output to ${NLTERM_HOME}/nlterm.log.
///
/// Logs never go to stdout or stderr: the TUI owns the terminal, and
/// exec mode's output must stay clean for piping. `NLTERM_LOG` sets the
/// filter (default `warn`).
fn init_file_logging() -> Result<()> {
    let log_path = config::paths::log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("NLTERM_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();

    Ok(())
}
