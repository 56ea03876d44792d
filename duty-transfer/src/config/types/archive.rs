use serde::{Deserialize, Serialize};

/// Where a fully processed manifest goes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ArchivePolicy {
    /// `archive/<name>`
    #[default]
    Move,
    /// `archive/Processed_on_<timestamp>_<name>`, for manifests saved from email attachments
    Stamped,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ArchiveConfig {
    pub policy: ArchivePolicy,

    /// Move the run log into the archive together with the manifest
    pub archive_logfile: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self { policy: ArchivePolicy::Move, archive_logfile: true }
    }
}
