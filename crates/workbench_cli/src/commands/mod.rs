//! CLI command definitions.
//!
//! Every subcommand works on one environment, selected with `--env-dir` and
//! `--name` (or `WORKBENCH_ENV_DIR` / `WORKBENCH_ENV_NAME`).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tokio_util::sync::CancellationToken;
use workbench_config::{EnvLocation, DEFAULT_ENV_DIR, DEFAULT_ENV_NAME};
use workbench_core::Environment;
use workbench_runner::CliExecutor;
use workbench_templates::TemplateSource;

pub mod configure;
pub mod create_env;
pub mod destroy;
pub mod down;
pub mod logs;
pub mod up;

/// s3c-workbench - local S3C development environments on docker compose
#[derive(Parser)]
#[command(name = "s3c-workbench")]
#[command(version, about = "Local S3C development environments on docker compose")]
#[command(long_about = r#"
s3c-workbench renders the configuration of a local S3C stack (cloudserver,
metadata, vault, backbeat, scuba, utapi...) from a single values.yaml and
drives it with docker compose.

COMMANDS:
  create-env  → Create an environment and render its configuration
  up          → Create, configure and start an environment
  configure   → Re-render the configuration of an environment
  down        → Stop an environment
  destroy     → Stop an environment and delete it with its volumes
  logs        → Show container logs

EXIT CODES:
  0 - Success (Ctrl+C included)
  1 - General error
  2 - Configuration error
  3 - Template error
  4 - docker compose error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Read templates from this directory instead of the built-in set
    #[arg(long, global = true, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Print docker compose commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new environment
    #[command(name = "create-env")]
    CreateEnv(create_env::CreateEnvArgs),

    /// Create, configure and start an environment
    Up(up::UpArgs),

    /// Render configuration files of an existing environment
    Configure(configure::ConfigureArgs),

    /// Stop an environment and delete its directory and volumes
    Destroy(destroy::DestroyArgs),

    /// Stop an environment
    Down(down::DownArgs),

    /// Show container logs
    Logs(logs::LogsArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Environment selection shared by most commands.
#[derive(Args, Debug, Clone)]
pub struct EnvArgs {
    /// Directory containing environments
    #[arg(short = 'd', long, env = "WORKBENCH_ENV_DIR", default_value = DEFAULT_ENV_DIR)]
    pub env_dir: PathBuf,

    /// Name of the environment
    #[arg(short = 'n', long, env = "WORKBENCH_ENV_NAME", default_value = DEFAULT_ENV_NAME)]
    pub name: String,
}

impl EnvArgs {
    pub fn location(&self) -> EnvLocation {
        EnvLocation::new(&self.env_dir, &self.name)
    }
}

/// Shared state handed to every command.
pub struct Context {
    pub templates: TemplateSource,
    pub executor: CliExecutor,
    pub cancel: CancellationToken,
}

impl Context {
    pub fn environment(&self, location: EnvLocation) -> Environment {
        Environment::new(location, self.templates.clone())
    }
}
