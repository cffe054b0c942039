//! Running compose commands.
//!
//! The executor forwards the child's stdio to the terminal and waits for it
//! to finish, unless the cancellation token fires first. An interrupted
//! command is not an error: the user asked the tool to stop.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::command::ComposeCommand;
use crate::error::{RunnerError, RunnerResult};

/// How a compose command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The process exited on its own. `None` means it was killed by a signal.
    Completed(Option<i32>),
    /// The command was interrupted through the cancellation token.
    Cancelled,
}

impl ExitOutcome {
    /// Exit code 0 or cancellation is success, anything else is an error.
    pub fn into_result(self, command: &ComposeCommand) -> RunnerResult<()> {
        match self {
            Self::Completed(Some(0)) | Self::Cancelled => Ok(()),
            Self::Completed(code) => Err(RunnerError::NonZeroExit {
                command: command.to_string(),
                code,
            }),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Something that can run compose commands.
#[async_trait]
pub trait ComposeExecutor: Send + Sync {
    /// Run a command to completion or until `cancel` fires.
    async fn execute(
        &self,
        command: &ComposeCommand,
        cancel: &CancellationToken,
    ) -> RunnerResult<ExitOutcome>;

    /// Run a command and turn a failing exit code into an error.
    async fn run(&self, command: &ComposeCommand, cancel: &CancellationToken) -> RunnerResult<()> {
        self.execute(command, cancel).await?.into_result(command)
    }
}

/// CLI executor options.
#[derive(Debug, Clone)]
pub struct ExecutorOptions {
    /// Dry-run mode (log commands without executing)
    pub dry_run: bool,
    /// Time the child gets to exit after an interrupt before it is killed
    pub grace_period: Duration,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            grace_period: Duration::from_secs(10),
        }
    }
}

impl ExecutorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn grace_period(mut self, period: Duration) -> Self {
        self.grace_period = period;
        self
    }
}

/// Runs compose commands as child processes.
#[derive(Debug, Clone, Default)]
pub struct CliExecutor {
    options: ExecutorOptions,
}

impl CliExecutor {
    pub fn new(options: ExecutorOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl ComposeExecutor for CliExecutor {
    async fn execute(
        &self,
        command: &ComposeCommand,
        cancel: &CancellationToken,
    ) -> RunnerResult<ExitOutcome> {
        if self.options.dry_run {
            info!(
                "[DRY RUN] Would execute in {}: {}",
                command.working_dir().display(),
                command
            );
            return Ok(ExitOutcome::Completed(Some(0)));
        }

        if cancel.is_cancelled() {
            debug!("Skipping {}: already interrupted", command);
            return Ok(ExitOutcome::Cancelled);
        }

        debug!("Executing: {}", command);

        let mut child = Command::new(command.program())
            .args(command.get_args())
            .current_dir(command.working_dir())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                program: command.program().to_string(),
                source,
            })?;

        let wait_error = |source: std::io::Error| RunnerError::Wait {
            program: command.program().to_string(),
            source,
        };

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(wait_error)?;
                // The terminal delivers SIGINT to the whole process group, so
                // compose may exit before the handler has cancelled the token.
                if cancel.is_cancelled() || interrupted(&status) {
                    return Ok(ExitOutcome::Cancelled);
                }
                debug!("{} exited with {}", command.program(), status);
                Ok(ExitOutcome::Completed(status.code()))
            }
            _ = cancel.cancelled() => {
                info!("Interrupted, waiting for {} to stop", command.program());
                match tokio::time::timeout(self.options.grace_period, child.wait()).await {
                    Ok(status) => {
                        status.map_err(wait_error)?;
                    }
                    Err(_) => {
                        warn!(
                            "{} did not stop within {:?}, killing it",
                            command.program(),
                            self.options.grace_period
                        );
                        child.kill().await.map_err(wait_error)?;
                    }
                }
                Ok(ExitOutcome::Cancelled)
            }
        }
    }
}

/// Exit status of a process stopped by SIGINT, either killed by the signal
/// or exiting with the shell convention `128 + SIGINT`.
fn interrupted(status: &std::process::ExitStatus) -> bool {
    const SIGINT: i32 = 2;

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if status.signal() == Some(SIGINT) {
            return true;
        }
    }
    status.code() == Some(128 + SIGINT)
}
