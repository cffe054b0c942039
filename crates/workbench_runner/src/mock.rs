//! Mock compose executor for testing.
//!
//! Records every command it receives and replays scripted outcomes, so the
//! command layer can be tested without Docker.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use crate::command::ComposeCommand;
use crate::error::{RunnerError, RunnerResult};
use crate::executor::{ComposeExecutor, ExitOutcome};

/// Scripted result of one mock execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOutcome {
    /// Exit with the given code.
    Exit(i32),
    /// Behave as if the user pressed Ctrl+C while the command ran.
    /// The cancellation token is cancelled before returning.
    Interrupted,
    /// Fail to start the program.
    SpawnFailure,
}

/// Mock executor for testing.
///
/// Commands without a scripted outcome exit with code 0.
#[derive(Clone, Default)]
pub struct MockExecutor {
    /// Outcomes returned in call order.
    outcomes: Arc<RwLock<Vec<MockOutcome>>>,
    /// Index of the next outcome to return.
    outcome_index: Arc<AtomicUsize>,
    /// Captured commands for verification.
    captured: Arc<RwLock<Vec<ComposeCommand>>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an outcome for the next unscripted call.
    pub fn add_outcome(self, outcome: MockOutcome) -> Self {
        self.outcomes.write().push(outcome);
        self
    }

    /// All commands executed so far.
    pub fn get_calls(&self) -> Vec<ComposeCommand> {
        self.captured.read().clone()
    }

    pub fn call_count(&self) -> usize {
        self.captured.read().len()
    }

    /// Commands whose compose subcommand is `subcommand`.
    pub fn get_subcommand_calls(&self, subcommand: &str) -> Vec<ComposeCommand> {
        self.captured
            .read()
            .iter()
            .filter(|c| c.subcommand() == Some(subcommand))
            .cloned()
            .collect()
    }

    pub fn was_called(&self, subcommand: &str) -> bool {
        !self.get_subcommand_calls(subcommand).is_empty()
    }

    /// Forget captured commands and rewind the scripted outcomes.
    pub fn reset(&self) {
        self.captured.write().clear();
        self.outcome_index.store(0, Ordering::SeqCst);
    }

    fn next_outcome(&self) -> MockOutcome {
        let index = self.outcome_index.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .read()
            .get(index)
            .copied()
            .unwrap_or(MockOutcome::Exit(0))
    }
}

#[async_trait]
impl ComposeExecutor for MockExecutor {
    async fn execute(
        &self,
        command: &ComposeCommand,
        cancel: &CancellationToken,
    ) -> RunnerResult<ExitOutcome> {
        self.captured.write().push(command.clone());

        if cancel.is_cancelled() {
            return Ok(ExitOutcome::Cancelled);
        }

        match self.next_outcome() {
            MockOutcome::Exit(code) => Ok(ExitOutcome::Completed(Some(code))),
            MockOutcome::Interrupted => {
                cancel.cancel();
                Ok(ExitOutcome::Cancelled)
            }
            MockOutcome::SpawnFailure => Err(RunnerError::Spawn {
                program: command.program().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock spawn failure"),
            }),
        }
    }
}
