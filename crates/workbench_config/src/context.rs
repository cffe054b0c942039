//! Data handed to templates.

use serde::Serialize;

use crate::feature::CloudserverGeneration;
use crate::model::Config;

/// The configuration plus values derived from it.
///
/// Serializes as the config's own keys with the derived ones added at the
/// top level.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    #[serde(flatten)]
    pub config: &'a Config,
    pub cloudserver_generation: CloudserverGeneration,
    pub cloudserver_is_v7: bool,
}

impl Config {
    pub fn render_context(&self) -> RenderContext<'_> {
        let generation = self.cloudserver_generation();
        RenderContext {
            config: self,
            cloudserver_generation: generation,
            cloudserver_is_v7: generation == CloudserverGeneration::V7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_flattens_config() {
        let mut config = Config::default();
        config.cloudserver.image = "cloudserver:7.10.2".to_string();

        let value = serde_yaml::to_value(config.render_context()).unwrap();
        assert_eq!(value["cloudserver_generation"], serde_yaml::Value::from("v7"));
        assert_eq!(value["cloudserver_is_v7"], serde_yaml::Value::from(true));
        assert_eq!(value["global"]["logLevel"], serde_yaml::Value::from("info"));
    }
}
