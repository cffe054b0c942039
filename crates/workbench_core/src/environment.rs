//! On-disk environment: scaffolding and rendered service configuration.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use workbench_config::{Config, EnvLocation};
use workbench_templates::{TemplateRenderer, TemplateSource};

use crate::error::{CoreError, CoreResult};

/// Per-service template sets rendered into `config/<service>/`.
pub const SERVICE_TEMPLATES: &[(&str, &[&str])] = &[
    ("cloudserver", &["config.json"]),
    (
        "backbeat",
        &[
            "Dockerfile.setup",
            "setup.sh",
            "setup-kafka-target.sh",
            "config.notification.json",
            "config.json",
            "supervisord.conf",
            "env",
        ],
    ),
    (
        "vault",
        &[
            "config.json",
            "create-management-account.sh",
            "Dockerfile.setup",
            "management-creds.json",
        ],
    ),
    (
        "scuba",
        &["create-service-user.sh", "Dockerfile.setup", "config.json"],
    ),
    ("utapi", &["config.json"]),
];

const METADATA_TEMPLATE: &str = "metadata/config.json";

/// Options for [`Environment::create`].
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Replace scaffold files that already exist
    pub overwrite: bool,
    /// Copy this file as `values.yaml` instead of the built-in one
    pub with_config: Option<PathBuf>,
    /// Copy this file as `docker-compose.yaml` instead of the built-in one
    pub with_compose: Option<PathBuf>,
}

/// A workbench environment and the templates used to populate it.
#[derive(Debug, Clone)]
pub struct Environment {
    location: EnvLocation,
    renderer: TemplateRenderer,
}

impl Environment {
    pub fn new(location: EnvLocation, source: TemplateSource) -> Self {
        Self {
            location,
            renderer: TemplateRenderer::new(source),
        }
    }

    pub fn location(&self) -> &EnvLocation {
        &self.location
    }

    pub fn path(&self) -> PathBuf {
        self.location.path()
    }

    /// Check whether the environment directory is present.
    ///
    /// Fails if the path exists but is not a directory.
    pub fn exists(&self) -> CoreResult<bool> {
        let path = self.path();
        match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => Ok(true),
            Ok(_) => Err(CoreError::NotADirectory(path)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CoreError::io(path, e)),
        }
    }

    /// Fail unless the environment directory exists.
    pub fn ensure_exists(&self) -> CoreResult<()> {
        if self.exists()? {
            Ok(())
        } else {
            Err(CoreError::EnvironmentNotFound(self.path()))
        }
    }

    /// Create the environment directory and its scaffold files.
    ///
    /// Idempotent: existing files are kept unless `overwrite` is set.
    pub fn create(&self, options: &CreateOptions) -> CoreResult<()> {
        info!("Creating environment {}", self.location.name);

        ensure_dir(&self.location.dir)?;
        ensure_dir(&self.path())?;

        let config_path = self.location.config_path();
        if should_write(&config_path, options.overwrite)? {
            match &options.with_config {
                Some(custom) => {
                    info!("Using custom configuration file {:?}", custom);
                    copy_file(custom, &config_path)?;
                }
                None => self
                    .renderer
                    .render_to_file("global/values.yaml", &(), &config_path)?,
            }
        }

        let gitignore_path = self.location.gitignore_path();
        if should_write(&gitignore_path, options.overwrite)? {
            self.renderer
                .render_to_file("global/gitignore", &(), &gitignore_path)?;
        }

        let compose_path = self.location.compose_path();
        if should_write(&compose_path, options.overwrite)? {
            match &options.with_compose {
                Some(custom) => {
                    info!("Using custom compose file {:?}", custom);
                    copy_file(custom, &compose_path)?;
                }
                None => self
                    .renderer
                    .render_to_file("global/docker-compose.yaml", &(), &compose_path)?,
            }
        }

        Ok(())
    }

    /// Load the environment's effective configuration.
    ///
    /// `override_path` replaces the environment's own `values.yaml`.
    pub fn load_config(&self, override_path: Option<&Path>) -> CoreResult<Config> {
        let config_path = self.location.config_path();
        let path = override_path.unwrap_or(config_path.as_path());
        debug!("Loading configuration from {:?}", path);
        Ok(Config::load(Some(path))?)
    }

    /// Like [`Environment::load_config`], but falls back to defaults when the
    /// environment has no `values.yaml`.
    pub fn load_config_or_default(&self) -> CoreResult<Config> {
        let config_path = self.location.config_path();
        if config_path.is_file() {
            Ok(Config::load(Some(config_path.as_path()))?)
        } else {
            debug!("No configuration at {:?}, using defaults", config_path);
            Ok(Config::load(None)?)
        }
    }

    /// Render `defaults.env` and every service's configuration.
    pub fn configure(&self, config: &Config) -> CoreResult<()> {
        let context = config.render_context();

        self.renderer.render_to_file(
            "global/defaults.env",
            &context,
            &self.location.defaults_env_path(),
        )?;

        let config_dir = self.location.config_dir();
        fs::create_dir_all(&config_dir).map_err(|e| CoreError::io(&config_dir, e))?;

        for (service, templates) in SERVICE_TEMPLATES {
            debug!("Rendering {} configuration", service);
            self.renderer
                .render_set(service, templates, &context, &config_dir.join(service))?;
        }

        self.renderer.render_to_file(
            METADATA_TEMPLATE,
            &config.s3_metadata,
            &config_dir.join("metadata-s3/config.json"),
        )?;
        self.renderer.render_to_file(
            METADATA_TEMPLATE,
            &config.scuba_metadata,
            &config_dir.join("metadata-scuba/config.json"),
        )?;

        info!("Environment {} configured", self.location.name);
        Ok(())
    }

    /// Delete the environment directory and everything in it.
    pub fn remove(&self) -> CoreResult<()> {
        let path = self.path();
        fs::remove_dir_all(&path).map_err(|e| CoreError::io(&path, e))?;
        info!("Removed environment directory {:?}", path);
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> CoreResult<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(CoreError::NotADirectory(path.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            fs::create_dir_all(path).map_err(|e| CoreError::io(path, e))
        }
        Err(e) => Err(CoreError::io(path, e)),
    }
}

fn should_write(path: &Path, overwrite: bool) -> CoreResult<bool> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(overwrite),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(CoreError::io(path, e)),
    }
}

fn copy_file(src: &Path, dest: &Path) -> CoreResult<()> {
    fs::copy(src, dest).map_err(|e| CoreError::io(src, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn environment(dir: &Path) -> Environment {
        Environment::new(EnvLocation::new(dir, "test"), TemplateSource::Embedded)
    }

    #[test]
    fn test_exists() {
        let temp = tempdir().unwrap();
        let env = environment(temp.path());
        assert!(!env.exists().unwrap());

        fs::create_dir(env.path()).unwrap();
        assert!(env.exists().unwrap());
    }

    #[test]
    fn test_file_in_place_of_environment() {
        let temp = tempdir().unwrap();
        let env = environment(temp.path());
        fs::write(env.path(), "not a directory").unwrap();

        assert!(matches!(env.exists(), Err(CoreError::NotADirectory(_))));
        assert!(matches!(
            env.create(&CreateOptions::default()),
            Err(CoreError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_ensure_exists() {
        let temp = tempdir().unwrap();
        let env = environment(temp.path());
        assert!(matches!(
            env.ensure_exists(),
            Err(CoreError::EnvironmentNotFound(_))
        ));
    }

    #[test]
    fn test_should_write() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("f");
        assert!(should_write(&file, false).unwrap());

        fs::write(&file, "x").unwrap();
        assert!(!should_write(&file, false).unwrap());
        assert!(should_write(&file, true).unwrap());
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let temp = tempdir().unwrap();
        let env = environment(temp.path());
        let config = env.load_config_or_default().unwrap();
        assert_eq!(config.vault.log_level, "info");
    }
}
