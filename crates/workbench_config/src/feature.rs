//! Feature toggles and their compose profiles.

use serde::{Deserialize, Serialize};

/// Optional component groups of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Scuba,
    BucketNotifications,
    Utapi,
    Migration,
}

impl Feature {
    /// Every feature, in the order profiles are passed to compose.
    pub const ALL: [Feature; 4] = [
        Feature::Scuba,
        Feature::BucketNotifications,
        Feature::Utapi,
        Feature::Migration,
    ];

    /// Compose profile that groups this feature's services.
    pub fn profile(&self) -> &'static str {
        match self {
            Self::Scuba => "feature-scuba",
            Self::BucketNotifications => "feature-notifications",
            Self::Utapi => "feature-utapi",
            Self::Migration => "feature-migration",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Scuba => "scuba",
            Self::BucketNotifications => "bucket_notifications",
            Self::Utapi => "utapi",
            Self::Migration => "migration",
        };
        write!(f, "{}", name)
    }
}

/// Cloudserver release line. Templates switch config layout on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudserverGeneration {
    V7,
    V9,
}

impl std::fmt::Display for CloudserverGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V7 => write!(f, "v7"),
            Self::V9 => write!(f, "v9"),
        }
    }
}

/// Derive the cloudserver release line from an image reference.
///
/// Only the leading digits of the tag are considered. Major version 7 maps to
/// [`CloudserverGeneration::V7`]; everything else, including untagged images
/// and tags such as `latest` or `dev`, maps to [`CloudserverGeneration::V9`].
pub fn detect_cloudserver_generation(image: &str) -> CloudserverGeneration {
    let tag = match image.rsplit_once(':') {
        // A colon inside the registry host ("host:5000/repo") is not a tag
        Some((_, tag)) if !tag.contains('/') => tag,
        _ => return CloudserverGeneration::V9,
    };

    let major: String = tag.chars().take_while(|c| c.is_ascii_digit()).collect();
    match major.parse::<u32>() {
        Ok(7) => CloudserverGeneration::V7,
        _ => CloudserverGeneration::V9,
    }
}
