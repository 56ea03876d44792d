use serde::{Deserialize, Serialize};

use super::constant::TEST_MODE_SENTINEL;

/// Root a manifest is processed against
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
pub enum ScriptMode {
    #[strum(serialize = "TEST")]
    Test,
    #[strum(serialize = "PROD")]
    Prod,
}

/// How the caller picks the [`ScriptMode`] for each manifest
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModeSelection {
    /// Inspect the manifest for the test sentinel
    #[default]
    Auto,
    Test,
    Prod,
}

impl ScriptMode {
    pub fn detect(manifest_content: &str) -> Self {
        if manifest_content.contains(TEST_MODE_SENTINEL) {
            ScriptMode::Test
        } else {
            ScriptMode::Prod
        }
    }
}

impl ModeSelection {
    /// Resolve the mode once, before the run context is built
    pub fn resolve(self, manifest_content: &str) -> ScriptMode {
        match self {
            ModeSelection::Auto => ScriptMode::detect(manifest_content),
            ModeSelection::Test => ScriptMode::Test,
            ModeSelection::Prod => ScriptMode::Prod,
        }
    }
}
