//! `docker compose` command lines.

use std::path::PathBuf;

use workbench_config::{Config, EnvLocation, DEFAULTS_ENV_FILE};

/// Profile that is always active.
pub const BASE_PROFILE: &str = "base";

/// Compose profiles for a configuration: `base` first, then one per enabled
/// feature in [`workbench_config::Feature::ALL`] order.
pub fn compose_profiles(config: &Config) -> Vec<&'static str> {
    std::iter::once(BASE_PROFILE)
        .chain(config.enabled_features().into_iter().map(|f| f.profile()))
        .collect()
}

/// A `docker compose` invocation scoped to one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeCommand {
    program: String,
    working_dir: PathBuf,
    args: Vec<String>,
}

impl ComposeCommand {
    /// Start a command with the global compose flags of an environment:
    /// project name, env file and profiles.
    pub fn for_environment(location: &EnvLocation, config: &Config) -> Self {
        let mut args = vec![
            "compose".to_string(),
            "--project-name".to_string(),
            location.name.clone(),
            "--env-file".to_string(),
            DEFAULTS_ENV_FILE.to_string(),
        ];
        for profile in compose_profiles(config) {
            args.push("--profile".to_string());
            args.push(profile.to_string());
        }

        Self {
            program: "docker".to_string(),
            working_dir: location.path(),
            args,
        }
    }

    /// Replace the executable, e.g. to use a wrapper script.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append `flag` only when `enabled` is set.
    pub fn flag_if(self, enabled: bool, flag: &str) -> Self {
        if enabled {
            self.arg(flag)
        } else {
            self
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn working_dir(&self) -> &PathBuf {
        &self.working_dir
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// The compose subcommand (`up`, `down`, `logs`...), if any.
    pub fn subcommand(&self) -> Option<&str> {
        const WITH_VALUE: [&str; 3] = ["--project-name", "--env-file", "--profile"];

        let mut iter = self.args.iter().skip(1);
        while let Some(arg) = iter.next() {
            if WITH_VALUE.contains(&arg.as_str()) {
                iter.next();
            } else if !arg.starts_with('-') {
                return Some(arg);
            }
        }
        None
    }
}

impl std::fmt::Display for ComposeCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Quote `arg` for a POSIX shell, leaving plain words untouched.
fn shell_quote(arg: &str) -> std::borrow::Cow<'_, str> {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@,+%".contains(c));
    if plain {
        arg.into()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''")).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> EnvLocation {
        EnvLocation::new("/tmp/envs", "dev")
    }

    #[test]
    fn test_base_profile_only_by_default() {
        assert_eq!(compose_profiles(&Config::default()), vec!["base"]);
    }

    #[test]
    fn test_profiles_follow_feature_order() {
        let mut config = Config::default();
        config.features.migration.enabled = true;
        config.features.bucket_notifications.enabled = true;
        config.features.scuba.enabled = true;

        assert_eq!(
            compose_profiles(&config),
            vec!["base", "feature-scuba", "feature-notifications", "feature-migration"]
        );
    }

    #[test]
    fn test_global_flags() {
        let mut config = Config::default();
        config.features.utapi.enabled = true;

        let command = ComposeCommand::for_environment(&location(), &config).arg("up");
        assert_eq!(
            command.argv(),
            vec![
                "docker", "compose", "--project-name", "dev", "--env-file", "defaults.env",
                "--profile", "base", "--profile", "feature-utapi", "up",
            ]
        );
        assert_eq!(command.working_dir(), &PathBuf::from("/tmp/envs/dev"));
    }

    #[test]
    fn test_flag_if() {
        let command = ComposeCommand::for_environment(&location(), &Config::default())
            .arg("up")
            .flag_if(true, "--detach")
            .flag_if(false, "--build");

        let args = command.get_args();
        assert!(args.contains(&"--detach".to_string()));
        assert!(!args.contains(&"--build".to_string()));
    }

    #[test]
    fn test_subcommand() {
        let command = ComposeCommand::for_environment(&location(), &Config::default());
        assert_eq!(command.subcommand(), None);

        let command = command.args(["logs", "--follow", "cloudserver"]);
        assert_eq!(command.subcommand(), Some("logs"));
    }

    #[test]
    fn test_display_quotes_args() {
        let command = ComposeCommand::for_environment(&location(), &Config::default())
            .with_program("my docker")
            .arg("--label=a b");
        let shown = command.to_string();
        assert!(shown.starts_with("'my docker' compose --project-name dev"));
        assert!(shown.ends_with(" '--label=a b'"));
    }

    #[test]
    fn test_display_escapes_shell_metacharacters() {
        let command = ComposeCommand::for_environment(&location(), &Config::default())
            .args(["logs", "it's", "a\tb", "$HOME", "", "--env-file=x.env"]);
        let shown = command.to_string();
        assert!(shown.ends_with(" logs 'it'\\''s' 'a\tb' '$HOME' '' --env-file=x.env"));
    }
}
