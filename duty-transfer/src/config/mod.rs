pub mod builder;
pub mod env_interpolation;
pub mod file;
pub mod types;
pub mod validation;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use builder::{load_config_from_run_cmd, ConfigBuilder};
pub use types::*;

use crate::types::ModeSelection;

/// Versioned configuration wrapper
/// This allows us to evolve the config format over time while maintaining backward compatibility
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "config_version")]
pub enum DutyConfigVersioned {
    #[serde(rename = "1")]
    V1(DutyConfigV1),
}

impl DutyConfigVersioned {
    /// Load configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content).context("Failed to parse YAML")?;

        if yaml_value.get("config_version").is_none() {
            anyhow::bail!(
                "Missing required field 'config_version' in config file. \
                 Current supported version: 1"
            );
        }

        let versioned: DutyConfigVersioned = serde_yaml::from_str(content).context("Failed to deserialize config")?;

        Ok(versioned)
    }

    /// Convert to the canonical (latest) config format
    pub fn into_canonical(self) -> DutyConfig {
        match self {
            DutyConfigVersioned::V1(v1) => v1,
        }
    }
}

/// Canonical configuration (always latest version internally)
pub type DutyConfig = DutyConfigV1;

/// Version 1 of the duty-transfer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DutyConfigV1 {
    #[serde(default)]
    pub mode: ModeSelection,
    #[serde(default)]
    pub roots: RootsConfig,
    #[serde(default)]
    pub destinations: DestinationsConfig,
    #[serde(default)]
    pub transfer: TransferConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
}
