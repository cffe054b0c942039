//! Integration tests for compose command execution.
//!
//! These use the mock executor so they run without Docker installed.

use tokio_util::sync::CancellationToken;
use workbench_config::{Config, EnvLocation};
use workbench_runner::{
    ComposeCommand, ComposeExecutor, ExitOutcome, MockExecutor, MockOutcome, RunnerError,
};

fn scuba_and_notifications() -> Config {
    let mut config = Config::default();
    config.features.scuba.enabled = true;
    config.features.bucket_notifications.enabled = true;
    config
}

#[tokio::test]
async fn test_profiles_reach_the_executor() {
    let mock = MockExecutor::new();
    let location = EnvLocation::new("/tmp/envs", "default");
    let command = ComposeCommand::for_environment(&location, &scuba_and_notifications())
        .args(["up", "--detach"]);

    mock.run(&command, &CancellationToken::new()).await.unwrap();

    let calls = mock.get_subcommand_calls("up");
    assert_eq!(calls.len(), 1);
    let args = calls[0].get_args().join(" ");
    assert!(args.contains("--profile base --profile feature-scuba --profile feature-notifications"));
    assert!(args.ends_with("up --detach"));
}

#[tokio::test]
async fn test_interrupt_is_a_clean_exit() {
    let mock = MockExecutor::new().add_outcome(MockOutcome::Interrupted);
    let cancel = CancellationToken::new();
    let command =
        ComposeCommand::for_environment(&EnvLocation::default(), &Config::default()).arg("logs");

    let outcome = mock.execute(&command, &cancel).await.unwrap();
    assert_eq!(outcome, ExitOutcome::Cancelled);
    assert!(outcome.into_result(&command).is_ok());

    // Anything run after the interrupt is skipped
    let outcome = mock.execute(&command, &cancel).await.unwrap();
    assert!(outcome.is_cancelled());
}

#[tokio::test]
async fn test_non_zero_exit_is_an_error() {
    let mock = MockExecutor::new().add_outcome(MockOutcome::Exit(1));
    let command =
        ComposeCommand::for_environment(&EnvLocation::default(), &Config::default()).arg("down");

    let err = mock.run(&command, &CancellationToken::new()).await.unwrap_err();
    match err {
        RunnerError::NonZeroExit { command, code } => {
            assert_eq!(code, Some(1));
            assert!(command.starts_with("docker compose"));
            assert!(command.ends_with("down"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
