use serde::{Deserialize, Serialize};

use crate::types::constant::{DEFAULT_CHAR_LIMIT, DEFAULT_MAX_ATTEMPTS, DEFAULT_SITE_FILTER};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransferConfig {
    /// Program invoked once per batch
    pub program: String,

    /// Fixed arguments placed before the batch argument, e.g. `-File get_DNAnexus_url.ps1`
    pub args: Vec<String>,

    /// Upper bound on the length of one batch argument
    pub char_limit: usize,

    /// Maximum number of times a batch is attempted before the run aborts
    pub max_attempts: u32,

    /// URL substring routing a job to the secondary site
    pub site_filter: String,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            program: "powershell".to_string(),
            args: Vec::new(),
            char_limit: DEFAULT_CHAR_LIMIT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            site_filter: DEFAULT_SITE_FILTER.to_string(),
        }
    }
}

impl TransferConfig {
    /// Fast policy for testing
    pub fn test_fast(program: impl Into<String>) -> Self {
        Self { program: program.into(), ..Self::default() }
    }

    /// The full command line for a batch, as written to the commands file
    pub fn command_line(&self, argument: &str) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 2);
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        parts.push(format!("'{}'", argument));
        parts.join(" ")
    }
}
