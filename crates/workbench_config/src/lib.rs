//! # workbench_config
//!
//! Configuration model for s3c-workbench environments.
//!
//! An environment's configuration is built once per command from three layers:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. An optional `values.yaml` overlay, merged key-by-key on top of the defaults
//! 3. A defaulting pass that copies `global.logLevel` into every service
//!    section whose `log_level` is still empty
//!
//! ## Example
//!
//! ```rust,no_run
//! use workbench_config::{Config, EnvLocation};
//!
//! let location = EnvLocation::new("./env", "default");
//! let config = Config::load(Some(location.config_path().as_path())).unwrap();
//!
//! for feature in config.enabled_features() {
//!     println!("profile: {}", feature.profile());
//! }
//!
//! // No path means defaults only
//! let defaults = Config::load(None).unwrap();
//! assert_eq!(defaults.cloudserver.log_level, "info");
//! ```

pub mod context;
pub mod error;
pub mod feature;
pub mod loader;
pub mod location;
pub mod model;

pub use context::RenderContext;
pub use error::{ConfigError, ConfigResult};
pub use feature::{detect_cloudserver_generation, CloudserverGeneration, Feature};
pub use location::{
    EnvLocation, COMPOSE_FILE, CONFIG_DIR, CONFIG_FILE, DEFAULTS_ENV_FILE, DEFAULT_ENV_DIR,
    DEFAULT_ENV_NAME, ENV_DIR_VAR, ENV_NAME_VAR, GITIGNORE_FILE,
};
pub use model::*;
