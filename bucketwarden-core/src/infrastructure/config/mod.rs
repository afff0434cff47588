// bucketwarden-core/src/infrastructure/config/mod.rs

use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument};
use validator::Validate;

use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_FILE: &str = "bucketwarden.yaml";
pub const ENV_TOPIC: &str = "WARDEN_TOPIC_ARN";
pub const ENV_ENDPOINT: &str = "WARDEN_ENDPOINT";

/// On-disk shape: everything optional, env layering fills the gaps.
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    topic_arn: Option<String>,
    endpoint: Option<String>,
}

/// Resolved process configuration.
///
/// The topic identifier is the one REQUIRED setting: without it the process
/// cannot initialize (startup-time fatal, not a per-event error).
#[derive(Debug, Validate, Clone)]
pub struct WardenConfig {
    #[validate(length(min = 1, message = "Topic identifier cannot be empty"))]
    pub topic_arn: String,

    /// Base URL of the storage control plane; only needed for live runs.
    pub endpoint: Option<String>,
}

/// Loads `bucketwarden.yaml` from the given directory (if present), then
/// applies environment-variable overrides (Pattern 'Layering'):
/// `WARDEN_TOPIC_ARN` and `WARDEN_ENDPOINT` win over the file.
#[instrument(skip(config_dir))]
pub fn load_config(config_dir: &Path) -> Result<WardenConfig, InfrastructureError> {
    let config_path = config_dir.join(CONFIG_FILE);
    let raw = if config_path.exists() {
        info!(path = ?config_path, "Loading configuration file");
        let content = std::fs::read_to_string(&config_path)?;
        serde_yaml::from_str(&content)?
    } else {
        RawConfig::default()
    };

    merge(raw, env_non_empty(ENV_TOPIC), env_non_empty(ENV_ENDPOINT))
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn merge(
    raw: RawConfig,
    env_topic: Option<String>,
    env_endpoint: Option<String>,
) -> Result<WardenConfig, InfrastructureError> {
    let topic_arn = env_topic.or(raw.topic_arn).ok_or_else(|| {
        InfrastructureError::ConfigError(format!(
            "Notification topic not configured. Set 'topic_arn' in {CONFIG_FILE} or export {ENV_TOPIC}."
        ))
    })?;

    let config = WardenConfig {
        topic_arn,
        endpoint: env_endpoint.or(raw.endpoint),
    };

    config
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;

    Ok(config)
}
