//! Provider-level configuration
//!
//! Default tags and ignore rules are declared once here and threaded
//! explicitly through every reconciliation call; there is no ambient global
//! tag state.

use crate::error::{ConfigError, Result, TagsyncError};
use crate::tags::{IgnoreRules, TagSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tags applied to every managed resource
    pub default_tags: TagSet,
    pub ignore_tags: IgnoreTagsConfig,
    pub reconcile: ReconcileConfig,
    pub aws: Option<AwsConfig>,
}

/// Tag keys excluded from reconciliation, by exact key or key prefix
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreTagsConfig {
    pub keys: Vec<String>,
    pub key_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Maximum apply attempts for transient remote failures
    pub max_attempts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    pub region: String,
    pub profile: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_tags: TagSet::new(),
            ignore_tags: IgnoreTagsConfig::default(),
            reconcile: ReconcileConfig::default(),
            aws: Some(AwsConfig {
                region: "us-east-1".to_string(),
                profile: None,
            }),
        }
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self { max_attempts: 5 }
    }
}

impl IgnoreTagsConfig {
    /// Build the OR'd ignore rules the reconciler consumes
    pub fn to_rules(&self) -> IgnoreRules {
        IgnoreRules {
            keys: self.keys.iter().cloned().collect(),
            key_prefixes: self.key_prefixes.iter().cloned().collect(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .tagsync.toml in current dir, then ~/.config/tagsync/config.toml
            let local = PathBuf::from(".tagsync.toml");
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("tagsync").join("config.toml"))
                    .unwrap_or_else(|| PathBuf::from(".tagsync.toml"))
            }
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                ConfigError::ParseError(format!("{}: {}", config_path.display(), e))
            })?;
            Ok(config)
        } else {
            if path.is_some() {
                tracing::warn!(
                    "Config file not found: {}, using defaults",
                    config_path.display()
                );
            }
            Ok(Config::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(format!("serialize: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Region from the [aws] section, required for client construction
    pub fn aws_region(&self) -> Result<&str> {
        self.aws
            .as_ref()
            .map(|a| a.region.as_str())
            .ok_or_else(|| TagsyncError::Config(ConfigError::MissingField("aws".to_string())))
    }
}
