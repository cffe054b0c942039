//! Where template bodies are read from.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{TemplateError, TemplateResult};

macro_rules! embedded {
    ($($path:literal),* $(,)?) => {
        &[$(($path, include_str!(concat!("../templates/", $path)))),*]
    };
}

/// Templates compiled into the binary, keyed by their relative path.
pub static EMBEDDED_TEMPLATES: &[(&str, &str)] = embedded![
    "global/values.yaml",
    "global/gitignore",
    "global/docker-compose.yaml",
    "global/defaults.env",
    "cloudserver/config.json",
    "backbeat/Dockerfile.setup",
    "backbeat/setup.sh",
    "backbeat/setup-kafka-target.sh",
    "backbeat/config.notification.json",
    "backbeat/config.json",
    "backbeat/supervisord.conf",
    "backbeat/env",
    "vault/config.json",
    "vault/create-management-account.sh",
    "vault/Dockerfile.setup",
    "vault/management-creds.json",
    "scuba/create-service-user.sh",
    "scuba/Dockerfile.setup",
    "scuba/config.json",
    "metadata/config.json",
    "utapi/config.json",
];

/// Source of template bodies.
///
/// Paths are relative and `/`-separated, e.g. `vault/config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// The template set shipped with the binary.
    #[default]
    Embedded,
    /// A directory laid out like the embedded set, overriding it entirely.
    Directory(PathBuf),
}

impl TemplateSource {
    /// Pick the directory override when given, the embedded set otherwise.
    pub fn from_override(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) => Self::Directory(dir),
            None => Self::Embedded,
        }
    }

    /// Read the body of a template.
    pub fn read(&self, path: &str) -> TemplateResult<String> {
        match self {
            Self::Embedded => EMBEDDED_TEMPLATES
                .iter()
                .find(|(name, _)| *name == path)
                .map(|(_, body)| body.to_string())
                .ok_or_else(|| TemplateError::NotFound(path.to_string())),
            Self::Directory(root) => {
                let file = root.join(path);
                debug!("Reading template from {:?}", file);
                fs::read_to_string(&file).map_err(|source| {
                    if source.kind() == std::io::ErrorKind::NotFound {
                        TemplateError::NotFound(file.display().to_string())
                    } else {
                        TemplateError::io(file, source)
                    }
                })
            }
        }
    }

    /// Check whether a template exists in this source.
    pub fn contains(&self, path: &str) -> bool {
        match self {
            Self::Embedded => EMBEDDED_TEMPLATES.iter().any(|(name, _)| *name == path),
            Self::Directory(root) => root.join(path).is_file(),
        }
    }
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded templates"),
            Self::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Template;
    use tempfile::tempdir;

    #[test]
    fn test_embedded_lookup() {
        let source = TemplateSource::Embedded;
        assert!(source.contains("vault/config.json"));
        assert!(source.read("global/gitignore").is_ok());
        assert!(matches!(
            source.read("nope/config.json"),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_embedded_templates_parse() {
        for (name, body) in EMBEDDED_TEMPLATES {
            if let Err(e) = Template::parse(*name, body) {
                panic!("embedded template {} does not parse: {}", name, e);
            }
        }
    }

    #[test]
    fn test_directory_override() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("vault")).unwrap();
        fs::write(temp.path().join("vault/config.json"), "{}").unwrap();

        let source = TemplateSource::from_override(Some(temp.path().to_path_buf()));
        assert_eq!(source.read("vault/config.json").unwrap(), "{}");
        assert!(!source.contains("global/gitignore"));
        assert!(matches!(
            source.read("global/gitignore"),
            Err(TemplateError::NotFound(_))
        ));
    }
}
