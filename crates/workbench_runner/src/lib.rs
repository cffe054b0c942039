//! # workbench_runner
//!
//! `docker compose` invocation for s3c-workbench environments.
//!
//! # Features
//!
//! - **Compose command lines**: profile flags derived from enabled features
//! - **CLI executor**: runs the command with inherited stdio, stops waiting on
//!   interrupt and reports the interrupt as a clean exit
//! - **Dry-run mode**: log commands without executing them
//! - **Mock executor**: for testing without Docker
//!
//! # Example
//!
//! ```rust,no_run
//! use tokio_util::sync::CancellationToken;
//! use workbench_config::{Config, EnvLocation};
//! use workbench_runner::{CliExecutor, ComposeCommand, ComposeExecutor, ExecutorOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let location = EnvLocation::default();
//!     let config = Config::load(Some(location.config_path().as_path()))?;
//!
//!     let command = ComposeCommand::for_environment(&location, &config)
//!         .arg("up")
//!         .arg("--detach");
//!
//!     let cancel = CancellationToken::new();
//!     workbench_runner::install_interrupt_handler(cancel.clone());
//!
//!     CliExecutor::new(ExecutorOptions::default())
//!         .run(&command, &cancel)
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod error;
pub mod executor;
pub mod mock;
pub mod signal;

pub use command::{compose_profiles, ComposeCommand, BASE_PROFILE};
pub use error::{RunnerError, RunnerResult};
pub use executor::{CliExecutor, ComposeExecutor, ExecutorOptions, ExitOutcome};
pub use mock::{MockExecutor, MockOutcome};
pub use signal::install_interrupt_handler;
