//! Where an environment lives on disk.

use std::path::PathBuf;

/// Parent directory of all environments when none is given.
pub const DEFAULT_ENV_DIR: &str = "./env";
/// Environment name when none is given.
pub const DEFAULT_ENV_NAME: &str = "default";

/// Environment variable overriding the environment directory.
pub const ENV_DIR_VAR: &str = "WORKBENCH_ENV_DIR";
/// Environment variable overriding the environment name.
pub const ENV_NAME_VAR: &str = "WORKBENCH_ENV_NAME";

pub const CONFIG_FILE: &str = "values.yaml";
pub const COMPOSE_FILE: &str = "docker-compose.yaml";
pub const DEFAULTS_ENV_FILE: &str = "defaults.env";
pub const GITIGNORE_FILE: &str = ".gitignore";
pub const CONFIG_DIR: &str = "config";

/// A named environment inside an environments directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvLocation {
    pub dir: PathBuf,
    pub name: String,
}

impl Default for EnvLocation {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_DIR, DEFAULT_ENV_NAME)
    }
}

impl EnvLocation {
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }

    /// Root directory of this environment.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join(CONFIG_FILE)
    }

    pub fn compose_path(&self) -> PathBuf {
        self.path().join(COMPOSE_FILE)
    }

    pub fn defaults_env_path(&self) -> PathBuf {
        self.path().join(DEFAULTS_ENV_FILE)
    }

    pub fn gitignore_path(&self) -> PathBuf {
        self.path().join(GITIGNORE_FILE)
    }

    /// Directory holding rendered per-service configuration.
    pub fn config_dir(&self) -> PathBuf {
        self.path().join(CONFIG_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_location() {
        let location = EnvLocation::default();
        assert_eq!(location.path(), PathBuf::from("./env/default"));
        assert_eq!(location.config_path(), PathBuf::from("./env/default/values.yaml"));
        assert_eq!(location.config_dir(), PathBuf::from("./env/default/config"));
    }

    #[test]
    fn test_custom_location() {
        let location = EnvLocation::new("/tmp/envs", "dev");
        assert_eq!(location.compose_path(), PathBuf::from("/tmp/envs/dev/docker-compose.yaml"));
        assert_eq!(location.defaults_env_path(), PathBuf::from("/tmp/envs/dev/defaults.env"));
        assert_eq!(location.gitignore_path(), PathBuf::from("/tmp/envs/dev/.gitignore"));
    }
}
