//! Integration tests for layered config loading.

use std::fs;

use tempfile::tempdir;
use workbench_config::{Config, ConfigError, Feature, VFormat};

fn defaults() -> Config {
    let mut config = Config::default();
    config.apply_log_level_defaults();
    config
}

#[test]
fn test_load_without_path_returns_defaults() {
    let config = Config::load(None).unwrap();
    assert_eq!(config, defaults());
    assert_eq!(config.kafka.log_level, "info");
}

#[test]
fn test_partial_overlay_only_changes_given_fields() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("values.yaml");
    fs::write(
        &path,
        r#"
cloudserver:
  image: ghcr.io/scality/cloudserver:7.70.62
s3_metadata:
  base_ports:
    bucketd: 9100
features:
  scuba:
    enabled: true
"#,
    )
    .unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();

    let mut expected = defaults();
    expected.cloudserver.image = "ghcr.io/scality/cloudserver:7.70.62".to_string();
    expected.s3_metadata.base_ports.bucketd = 9100;
    expected.features.scuba.enabled = true;

    assert_eq!(config, expected);
    assert_eq!(config.s3_metadata.base_ports.repd, 4200);
    assert_eq!(config.enabled_features(), vec![Feature::Scuba]);
}

#[test]
fn test_unset_service_log_level_inherits_global() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("values.yaml");
    fs::write(
        &path,
        "global:\n  logLevel: debug\nvault:\n  log_level: trace\nredis:\n  log_level: \"\"\n",
    )
    .unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();

    assert_eq!(config.global.log_level, "debug");
    assert_eq!(config.vault.log_level, "trace");
    assert_eq!(config.redis.log_level, "debug");
    assert_eq!(config.cloudserver.log_level, "debug");
    assert_eq!(config.s3_metadata.log_level, "debug");
    assert_eq!(config.utapi.log_level, "debug");
}

#[test]
fn test_explicit_zero_values_override_defaults() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("values.yaml");
    fs::write(
        &path,
        "scuba_metadata:\n  raft_sessions: 0\n  base_ports:\n    repd: 0\n  vformat: v1\n",
    )
    .unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();

    assert_eq!(config.scuba_metadata.raft_sessions, 0);
    assert_eq!(config.scuba_metadata.base_ports.repd, 0);
    assert_eq!(config.scuba_metadata.base_ports.bucketd, 19000);
    assert_eq!(config.scuba_metadata.vformat, VFormat::V1);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("values.yaml");
    fs::write(&path, "not_a_service:\n  image: foo\ncloudserver:\n  replicas: 4\n").unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config, defaults());
}

#[test]
fn test_missing_file_is_read_error() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("missing.yaml");

    let err = Config::load(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_malformed_yaml_is_parse_error() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("values.yaml");
    fs::write(&path, "global:\n  logLevel: [debug\n").unwrap();

    let err = Config::load(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("values.yaml"));
}

#[test]
fn test_effective_config_round_trips_through_yaml() {
    let mut config = defaults();
    config.features.bucket_notifications.enabled = true;
    config.features.bucket_notifications.destination_auth.auth_type = "basic".to_string();

    let yaml = config.to_yaml().unwrap();
    assert_eq!(Config::from_yaml_str(&yaml).unwrap(), config);
}

#[test]
fn test_empty_strings_keep_defaults() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("values.yaml");
    fs::write(
        &path,
        "global:\n  logLevel: \"\"\nfeatures:\n  bucket_notifications:\n    enabled: false\n    destinationAuth:\n      type: \"\"\n",
    )
    .unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();

    assert_eq!(config, defaults());
    assert_eq!(config.global.log_level, "info");
    assert_eq!(config.backbeat.log_level, "info");
    assert_eq!(config.features.bucket_notifications.destination_auth.auth_type, "none");
}
