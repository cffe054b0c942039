//! Integration tests rendering the embedded template set with real configs.

use std::fs;

use tempfile::tempdir;
use workbench_config::Config;
use workbench_templates::{TemplateError, TemplateRenderer, TemplateSource, EMBEDDED_TEMPLATES};

const SCAFFOLD_TEMPLATES: [&str; 3] = [
    "global/values.yaml",
    "global/gitignore",
    "global/docker-compose.yaml",
];

fn all_features_config() -> Config {
    let mut config = Config::from_yaml_str(
        r#"
features:
  scuba: { enabled: true, enable_service_user: true }
  bucket_notifications:
    enabled: true
    destinationAuth: { type: basic, username: alice, password: secret }
  utapi: { enabled: true }
  migration: { enabled: true }
cloudserver:
  image: ghcr.io/scality/cloudserver:7.70.62
"#,
    )
    .unwrap();
    config.apply_log_level_defaults();
    config
}

#[test]
fn test_every_embedded_template_renders_with_defaults() {
    let renderer = TemplateRenderer::new(TemplateSource::Embedded);
    let config = Config::load(None).unwrap();

    for (name, _) in EMBEDDED_TEMPLATES {
        let result = if name.starts_with("metadata/") {
            renderer.render(name, &config.s3_metadata)
        } else {
            renderer.render(name, &config.render_context())
        };
        assert!(result.is_ok(), "{} failed: {:?}", name, result.err());
    }
}

#[test]
fn test_every_embedded_template_renders_with_all_features() {
    let renderer = TemplateRenderer::new(TemplateSource::Embedded);
    let config = all_features_config();

    for (name, _) in EMBEDDED_TEMPLATES {
        let result = if name.starts_with("metadata/") {
            renderer.render(name, &config.scuba_metadata)
        } else {
            renderer.render(name, &config.render_context())
        };
        assert!(result.is_ok(), "{} failed: {:?}", name, result.err());
    }
}

#[test]
fn test_scaffold_templates_need_no_data() {
    let renderer = TemplateRenderer::new(TemplateSource::Embedded);
    for name in SCAFFOLD_TEMPLATES {
        renderer.render(name, &()).unwrap();
    }
}

#[test]
fn test_rendered_json_is_valid() {
    let renderer = TemplateRenderer::new(TemplateSource::Embedded);

    for config in [Config::load(None).unwrap(), all_features_config()] {
        let context = config.render_context();
        for name in [
            "cloudserver/config.json",
            "backbeat/config.json",
            "backbeat/config.notification.json",
            "vault/config.json",
            "scuba/config.json",
            "utapi/config.json",
        ] {
            let rendered = renderer.render(name, &context).unwrap();
            let parsed: Result<serde_yaml::Value, _> = serde_yaml::from_str(&rendered);
            assert!(parsed.is_ok(), "{} is not valid JSON:\n{}", name, rendered);
        }

        let metadata = renderer.render("metadata/config.json", &config.s3_metadata).unwrap();
        assert!(serde_yaml::from_str::<serde_yaml::Value>(&metadata).is_ok());
    }
}

#[test]
fn test_rendering_is_idempotent() {
    let renderer = TemplateRenderer::new(TemplateSource::Embedded);
    let config = all_features_config();
    let out = tempdir().unwrap();
    let dest = out.path().join("cloudserver/config.json");

    renderer
        .render_to_file("cloudserver/config.json", &config.render_context(), &dest)
        .unwrap();
    let first = fs::read(&dest).unwrap();

    renderer
        .render_to_file("cloudserver/config.json", &config.render_context(), &dest)
        .unwrap();
    let second = fs::read(&dest).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_log_levels_reach_rendered_files() {
    let renderer = TemplateRenderer::new(TemplateSource::Embedded);
    let mut config = Config::from_yaml_str("global:\n  logLevel: debug\nvault:\n  log_level: trace\n").unwrap();
    config.apply_log_level_defaults();
    let context = config.render_context();

    let vault = renderer.render("vault/config.json", &context).unwrap();
    assert!(vault.contains(r#""level": "trace""#));

    let cloudserver = renderer.render("cloudserver/config.json", &context).unwrap();
    assert!(cloudserver.contains(r#""logLevel": "debug""#));
}

#[test]
fn test_cloudserver_generation_switches_layout() {
    let renderer = TemplateRenderer::new(TemplateSource::Embedded);

    let v7 = all_features_config();
    let rendered = renderer.render("cloudserver/config.json", &v7.render_context()).unwrap();
    assert!(!rendered.contains("supportedLifecycleRules"));

    let v9 = Config::load(None).unwrap();
    let rendered = renderer.render("cloudserver/config.json", &v9.render_context()).unwrap();
    assert!(rendered.contains("supportedLifecycleRules"));
}

#[test]
fn test_metadata_template_uses_section_data() {
    let renderer = TemplateRenderer::new(TemplateSource::Embedded);
    let config = Config::load(None).unwrap();

    let s3 = renderer.render("metadata/config.json", &config.s3_metadata).unwrap();
    assert!(s3.contains(r#""bucketd": 9000"#));
    assert!(s3.contains(r#""METADATA_NEW_BUCKETS_VFORMAT": "v1""#));

    let scuba = renderer.render("metadata/config.json", &config.scuba_metadata).unwrap();
    assert!(scuba.contains(r#""bucketd": 19000"#));
    assert!(scuba.contains(r#""raftSessions": 1"#));
}

#[test]
fn test_batch_failure_keeps_earlier_files() {
    let templates = tempdir().unwrap();
    let svc = templates.path().join("svc");
    fs::create_dir_all(&svc).unwrap();
    fs::write(svc.join("one"), "level={{global.logLevel}}").unwrap();
    fs::write(svc.join("two"), "{{#if global.logLevel}}unclosed").unwrap();
    fs::write(svc.join("three"), "never rendered").unwrap();

    let out = tempdir().unwrap();
    let renderer = TemplateRenderer::new(TemplateSource::Directory(templates.path().to_path_buf()));
    let config = Config::load(None).unwrap();

    let err = renderer
        .render_set("svc", &["one", "two", "three"], &config.render_context(), out.path())
        .unwrap_err();

    assert!(matches!(err, TemplateError::Syntax { .. }));
    assert_eq!(fs::read_to_string(out.path().join("one")).unwrap(), "level=info");
    assert!(!out.path().join("two").exists());
    assert!(!out.path().join("three").exists());
}
