//! Error types for the core module.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while managing an environment.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Environment not found: {}", .0.display())]
    EnvironmentNotFound(PathBuf),

    #[error("{} exists but is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] workbench_config::ConfigError),

    #[error(transparent)]
    Template(#[from] workbench_templates::TemplateError),

    #[error(transparent)]
    Runner(#[from] workbench_runner::RunnerError),
}

impl CoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
