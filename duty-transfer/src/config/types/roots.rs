use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::ScriptMode;

/// Folder holding incoming manifests, one per mode.
/// `archive/`, `cmds_logs/` and `process_logs/` live underneath.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RootsConfig {
    pub test: PathBuf,
    pub prod: PathBuf,
}

impl Default for RootsConfig {
    fn default() -> Self {
        Self {
            test: PathBuf::from("P:/Bioinformatics/testing/process_duty_csv/"),
            prod: PathBuf::from("P:/Bioinformatics/Duty_Bioinformatics_CSV/"),
        }
    }
}

impl RootsConfig {
    pub fn for_mode(&self, mode: ScriptMode) -> &Path {
        match mode {
            ScriptMode::Test => &self.test,
            ScriptMode::Prod => &self.prod,
        }
    }
}
