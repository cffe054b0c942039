//! Environment lifecycle operations behind the CLI commands.
//!
//! Each operation takes the executor as a trait object so tests can swap in
//! [`workbench_runner::MockExecutor`].

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use workbench_config::Config;
use workbench_runner::{ComposeCommand, ComposeExecutor};

use crate::environment::{CreateOptions, Environment};
use crate::error::CoreResult;

/// Seconds compose waits for containers to stop before killing them.
pub const DEFAULT_DOWN_TIMEOUT: u32 = 10;

#[derive(Debug, Clone, Default)]
pub struct UpOptions {
    pub create: CreateOptions,
    /// Skip rendering configuration before starting
    pub no_configure: bool,
    pub detach: bool,
    pub build: bool,
    pub no_cache: bool,
}

#[derive(Debug, Clone)]
pub struct DownOptions {
    pub timeout: u32,
    /// Also remove named and anonymous volumes
    pub volumes: bool,
}

impl Default for DownOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_DOWN_TIMEOUT,
            volumes: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogsOptions {
    pub follow: bool,
    /// Restrict output to these services; all services when empty
    pub services: Vec<String>,
}

/// Scaffold an environment and render its configuration.
///
/// The configuration comes from `with_config` when given, otherwise from the
/// environment's `values.yaml`.
pub fn create_env(env: &Environment, options: &CreateOptions) -> CoreResult<Config> {
    env.create(options)?;
    let config = env.load_config(options.with_config.as_deref())?;
    env.configure(&config)?;
    Ok(config)
}

/// Re-render the configuration of an existing environment.
pub fn configure(env: &Environment) -> CoreResult<Config> {
    env.ensure_exists()?;
    let config = env.load_config(None)?;
    if tracing::enabled!(tracing::Level::DEBUG) {
        debug!("Effective configuration:\n{}", config.to_yaml()?);
    }
    env.configure(&config)?;
    info!("Configuration files generated successfully");
    Ok(config)
}

/// Create (if needed), configure and start an environment.
pub async fn up(
    env: &Environment,
    executor: &dyn ComposeExecutor,
    options: &UpOptions,
    cancel: &CancellationToken,
) -> CoreResult<()> {
    env.create(&options.create)?;
    let config = env.load_config(None)?;

    if options.no_configure {
        debug!("Skipping configuration rendering");
    } else {
        env.configure(&config)?;
    }

    let command = compose(env, &config)
        .arg("up")
        .flag_if(options.detach, "--detach")
        .flag_if(options.build, "--build")
        .flag_if(options.no_cache, "--no-cache");

    info!("Starting environment: {}", command);
    executor.run(&command, cancel).await?;
    Ok(())
}

/// Stop a running environment.
pub async fn down(
    env: &Environment,
    executor: &dyn ComposeExecutor,
    options: &DownOptions,
    cancel: &CancellationToken,
) -> CoreResult<()> {
    env.ensure_exists()?;
    let config = env.load_config(None)?;

    let command = compose(env, &config)
        .args(["down".to_string(), "--timeout".to_string(), options.timeout.to_string()])
        .flag_if(options.volumes, "--volumes");

    info!("Stopping environment: {}", command);
    executor.run(&command, cancel).await?;
    Ok(())
}

/// Stop an environment, remove its volumes and delete its directory.
///
/// A missing environment is not an error. The directory is kept when the
/// shutdown is interrupted so a later `destroy` can finish the job.
pub async fn destroy(
    env: &Environment,
    executor: &dyn ComposeExecutor,
    timeout: u32,
    cancel: &CancellationToken,
) -> CoreResult<()> {
    if !env.exists()? {
        info!("Environment {} does not exist, nothing to destroy", env.location().name);
        return Ok(());
    }

    let config = env.load_config_or_default()?;
    let command = compose(env, &config).args([
        "down".to_string(),
        "--volumes".to_string(),
        "--timeout".to_string(),
        timeout.to_string(),
    ]);

    info!("Destroying environment: {}", command);
    executor.run(&command, cancel).await?;

    if cancel.is_cancelled() {
        warn!("Interrupted, keeping {:?}", env.path());
        return Ok(());
    }

    env.remove()
}

/// Show (or follow) container logs.
pub async fn logs(
    env: &Environment,
    executor: &dyn ComposeExecutor,
    options: &LogsOptions,
    cancel: &CancellationToken,
) -> CoreResult<()> {
    env.ensure_exists()?;
    let config = env.load_config_or_default()?;

    let command = compose(env, &config)
        .arg("logs")
        .flag_if(options.follow, "--follow")
        .args(options.services.iter().cloned());

    info!("Fetching logs: {}", command);
    executor.run(&command, cancel).await?;
    Ok(())
}

fn compose(env: &Environment, config: &Config) -> ComposeCommand {
    ComposeCommand::for_environment(env.location(), config)
}
