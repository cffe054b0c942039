//! # workbench_core
//!
//! Environment lifecycle for s3c-workbench.
//!
//! An [`Environment`] is a directory holding `values.yaml`, a compose file and
//! the configuration rendered from them. The [`lifecycle`] operations tie it
//! to `docker compose`:
//!
//! - **create-env**: scaffold the directory and render configuration
//! - **configure**: re-render configuration of an existing environment
//! - **up** / **down** / **logs**: compose with the environment's profiles
//! - **destroy**: stop containers, drop volumes, delete the directory
//!
//! # Example
//!
//! ```rust,no_run
//! use tokio_util::sync::CancellationToken;
//! use workbench_config::EnvLocation;
//! use workbench_core::{lifecycle, Environment, UpOptions};
//! use workbench_runner::{CliExecutor, ExecutorOptions};
//! use workbench_templates::TemplateSource;
//!
//! # async fn run() -> workbench_core::CoreResult<()> {
//! let env = Environment::new(EnvLocation::default(), TemplateSource::Embedded);
//! let executor = CliExecutor::new(ExecutorOptions::default());
//!
//! let options = UpOptions {
//!     detach: true,
//!     ..Default::default()
//! };
//! lifecycle::up(&env, &executor, &options, &CancellationToken::new()).await?;
//! # Ok(())
//! # }
//! ```

pub mod environment;
pub mod error;
pub mod lifecycle;

pub use environment::{CreateOptions, Environment, SERVICE_TEMPLATES};
pub use error::{CoreError, CoreResult};
pub use lifecycle::{DownOptions, LogsOptions, UpOptions, DEFAULT_DOWN_TIMEOUT};
