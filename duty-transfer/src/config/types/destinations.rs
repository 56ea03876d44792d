use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DutyError;

/// Destination roots per project layout
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DestinationsConfig {
    /// Every WES file lands here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wes: Option<PathBuf>,

    /// SNP VCFs land here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snp: Option<PathBuf>,

    /// Parent of the per-run TSO500 results folders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tso500_results: Option<PathBuf>,

    /// Appended to the TSO500 run folder name
    #[serde(default)]
    pub tso500_folder_suffix: String,

    /// Parent of the NGS worksheet folders used by MokaPipe runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mokapipe_worksheets: Option<PathBuf>,

    /// Outgoing folder for the secondary site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_site_transfer: Option<PathBuf>,
}

impl DestinationsConfig {
    /// Returns the configured destination or a configuration error naming the missing key
    pub fn require<'a>(value: &'a Option<PathBuf>, key: &str) -> Result<&'a Path, DutyError> {
        value.as_deref().ok_or_else(|| DutyError::ConfigError(format!("destinations.{} is not configured", key)))
    }
}
