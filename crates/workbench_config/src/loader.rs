//! Layered configuration loading.

use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::model::Config;

impl Config {
    /// Load a configuration, merging `path` over the built-in defaults.
    ///
    /// Without a path the defaults are returned. Any read or parse failure
    /// aborts the load; no partially merged config is ever returned.
    pub fn load(path: Option<&Path>) -> ConfigResult<Config> {
        let Some(path) = path else {
            debug!("No config file given, using defaults");
            let mut config = Config::default();
            config.apply_log_level_defaults();
            return Ok(config);
        };

        debug!("Loading config from {:?}", path);
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let parse_error = |source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        };

        let overlay: Value = serde_yaml::from_str(&content).map_err(parse_error)?;
        Self::merged_with(overlay).map_err(parse_error)
    }

    /// Parse a YAML document and merge it over the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Config, serde_yaml::Error> {
        let overlay: Value = serde_yaml::from_str(content)?;
        Self::merged_with(overlay)
    }

    fn merged_with(overlay: Value) -> Result<Config, serde_yaml::Error> {
        let mut merged = serde_yaml::to_value(Config::default())?;
        merge_values(&mut merged, overlay);

        let mut config: Config = serde_yaml::from_value(merged)?;
        config.apply_log_level_defaults();
        Ok(config)
    }
}

/// Merge `overlay` into `base`.
///
/// Mappings are merged key by key. Any other value present in the overlay
/// replaces the base value, including `0` and `false`. Absent keys, explicit
/// nulls and empty strings keep what `base` holds.
pub fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, value) if is_unset(&value) => {}
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None if is_unset(&value) => {}
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
