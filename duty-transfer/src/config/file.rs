use std::path::Path;

use anyhow::{Context, Result};

use super::env_interpolation::interpolate_yaml_content;
use super::{DutyConfig, DutyConfigVersioned};

/// Read a YAML config file, interpolate `${VAR}` references and return the canonical config
pub fn load_config_file(path: &Path) -> Result<DutyConfig> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let content = interpolate_yaml_content(&raw)
        .with_context(|| format!("Failed to interpolate environment variables in {}", path.display()))?;
    Ok(DutyConfigVersioned::from_yaml_str(&content)?.into_canonical())
}
