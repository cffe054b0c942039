//! s3c-workbench CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success (including an interrupted command)
//! - 1: General error
//! - 2: Configuration error
//! - 3: Template error
//! - 4: docker compose error

use std::process::ExitCode;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands, Context, LogFormat};
use workbench_config::ConfigError;
use workbench_core::CoreError;
use workbench_runner::{CliExecutor, ExecutorOptions, RunnerError};
use workbench_templates::{TemplateError, TemplateSource};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const CONFIG_ERROR: u8 = 2;
    pub const TEMPLATE_ERROR: u8 = 3;
    pub const COMPOSE_ERROR: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli);

    let cancel = CancellationToken::new();
    workbench_runner::install_interrupt_handler(cancel.clone());

    let ctx = Context {
        templates: TemplateSource::from_override(cli.templates_dir.clone()),
        executor: CliExecutor::new(ExecutorOptions::new().dry_run(cli.dry_run)),
        cancel,
    };

    let result = match cli.command {
        Commands::CreateEnv(args) => commands::create_env::execute(args, &ctx).await,
        Commands::Up(args) => commands::up::execute(args, &ctx).await,
        Commands::Configure(args) => commands::configure::execute(args, &ctx).await,
        Commands::Destroy(args) => commands::destroy::execute(args, &ctx).await,
        Commands::Down(args) => commands::down::execute(args, &ctx).await,
        Commands::Logs(args) => commands::logs::execute(args, &ctx).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

/// Set up the global subscriber. `RUST_LOG`, when set, wins over `--log-level`.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);

    let log_result = match cli.log_format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

/// Map the first library error in the chain to an exit code.
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(core) = cause.downcast_ref::<CoreError>() {
            return match core {
                CoreError::Config(_) => ExitCodes::CONFIG_ERROR,
                CoreError::Template(_) => ExitCodes::TEMPLATE_ERROR,
                CoreError::Runner(_) => ExitCodes::COMPOSE_ERROR,
                _ => ExitCodes::GENERAL_ERROR,
            };
        }
        if cause.is::<ConfigError>() {
            return ExitCodes::CONFIG_ERROR;
        }
        if cause.is::<TemplateError>() {
            return ExitCodes::TEMPLATE_ERROR;
        }
        if cause.is::<RunnerError>() {
            return ExitCodes::COMPOSE_ERROR;
        }
    }
    ExitCodes::GENERAL_ERROR
}
