//! Configuration data model.
//!
//! Field names follow the keys used in `values.yaml`, which are also the names
//! templates use to reference values (for example `s3_metadata.base_ports.bucketd`).

use serde::{Deserialize, Serialize};

use crate::feature::{detect_cloudserver_generation, CloudserverGeneration, Feature};

/// Log level applied to every service that does not set its own.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root configuration of a workbench environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub global: GlobalConfig,
    pub features: FeatureConfig,
    pub cloudserver: CloudserverConfig,
    pub s3_metadata: MetadataConfig,
    pub backbeat: ServiceConfig,
    pub vault: ServiceConfig,
    pub scuba: ServiceConfig,
    pub scuba_metadata: MetadataConfig,
    pub kafka: ServiceConfig,
    pub zookeeper: ServiceConfig,
    pub redis: ServiceConfig,
    pub utapi: ServiceConfig,
    pub migration_tools: ServiceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            features: FeatureConfig::default(),
            cloudserver: CloudserverConfig::default(),
            s3_metadata: MetadataConfig {
                image: String::new(),
                raft_sessions: 3,
                base_ports: MetadataPorts {
                    bucketd: 9000,
                    repd: 4200,
                    repd_admin: 4250,
                },
                log_level: String::new(),
                vformat: VFormat::V1,
            },
            backbeat: ServiceConfig::default(),
            vault: ServiceConfig::default(),
            scuba: ServiceConfig::default(),
            scuba_metadata: MetadataConfig {
                image: String::new(),
                raft_sessions: 1,
                base_ports: MetadataPorts {
                    bucketd: 19000,
                    repd: 14200,
                    repd_admin: 14250,
                },
                log_level: String::new(),
                vformat: VFormat::V0,
            },
            kafka: ServiceConfig::default(),
            zookeeper: ServiceConfig::default(),
            redis: ServiceConfig::default(),
            utapi: ServiceConfig::default(),
            migration_tools: ServiceConfig::default(),
        }
    }
}

impl Config {
    /// Copy the global log level into every service section that has none.
    pub fn apply_log_level_defaults(&mut self) {
        let global = self.global.log_level.clone();
        for level in self.service_log_levels_mut() {
            if level.trim().is_empty() {
                level.clone_from(&global);
            }
        }
    }

    fn service_log_levels_mut(&mut self) -> [&mut String; 11] {
        [
            &mut self.cloudserver.log_level,
            &mut self.s3_metadata.log_level,
            &mut self.backbeat.log_level,
            &mut self.vault.log_level,
            &mut self.scuba.log_level,
            &mut self.scuba_metadata.log_level,
            &mut self.kafka.log_level,
            &mut self.zookeeper.log_level,
            &mut self.redis.log_level,
            &mut self.utapi.log_level,
            &mut self.migration_tools.log_level,
        ]
    }

    /// Features switched on in this configuration, in profile order.
    pub fn enabled_features(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|feature| self.is_enabled(*feature))
            .collect()
    }

    /// Check whether a single feature is enabled.
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Scuba => self.features.scuba.enabled,
            Feature::BucketNotifications => self.features.bucket_notifications.enabled,
            Feature::Utapi => self.features.utapi.enabled,
            Feature::Migration => self.features.migration.enabled,
        }
    }

    /// Major release line of the configured cloudserver image.
    pub fn cloudserver_generation(&self) -> CloudserverGeneration {
        detect_cloudserver_generation(&self.cloudserver.image)
    }

    /// Serialize the effective configuration back to YAML.
    pub fn to_yaml(&self) -> crate::ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Settings shared by all services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    #[serde(rename = "logLevel")]
    pub log_level: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Feature toggles. Every feature is off unless enabled explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub scuba: ScubaFeature,
    pub bucket_notifications: BucketNotificationsFeature,
    pub utapi: Toggle,
    pub migration: Toggle,
}

/// A feature with no settings besides its switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toggle {
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScubaFeature {
    pub enabled: bool,
    /// Create the scuba service user in vault during setup
    pub enable_service_user: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketNotificationsFeature {
    pub enabled: bool,
    #[serde(rename = "destinationAuth")]
    pub destination_auth: DestinationAuth,
}

/// Credentials used by backbeat to reach the notification destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationAuth {
    #[serde(rename = "type")]
    pub auth_type: String,
    pub username: String,
    pub password: String,
}

impl Default for DestinationAuth {
    fn default() -> Self {
        Self {
            auth_type: "none".to_string(),
            username: String::new(),
            password: String::new(),
        }
    }
}

/// Image and log level of a service with no further settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub image: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudserverConfig {
    pub image: String,
    #[serde(rename = "enableNullVersionCompatMode")]
    pub enable_null_version_compat_mode: bool,
    pub log_level: String,
}

/// Settings of a metadata cluster (one for S3, one for scuba).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub image: String,
    pub raft_sessions: u32,
    pub base_ports: MetadataPorts,
    pub log_level: String,
    pub vformat: VFormat,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Config::default().s3_metadata
    }
}

/// First port of each metadata daemon; raft session `n` listens on `base + n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataPorts {
    pub bucketd: u16,
    pub repd: u16,
    #[serde(rename = "repdAdmin")]
    pub repd_admin: u16,
}

/// On-disk metadata format version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VFormat {
    V0,
    #[default]
    V1,
}

impl std::fmt::Display for VFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V0 => write!(f, "v0"),
            Self::V1 => write!(f, "v1"),
        }
    }
}
