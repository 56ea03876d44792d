//! Configuration builder that implements the hierarchy: CLI > ENV > Config File > Defaults

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use super::file::load_config_file;
use super::validation::Validate;
use super::DutyConfig;
use crate::cli::RunCmd;

/// Configuration builder that merges config from multiple sources
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: DutyConfig,
}

impl ConfigBuilder {
    /// Start from the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from a file path, replacing the defaults
    pub fn with_config_file(mut self, path: &Path) -> Result<Self> {
        info!("Loading configuration from file: {}", path.display());
        self.config = load_config_file(path)?;
        Ok(self)
    }

    /// Apply CLI overrides on top of the base config.
    /// Env fallbacks are resolved by clap, so this covers both CLI args and ENV vars
    pub fn with_cli_overrides(mut self, run_cmd: &RunCmd) -> Self {
        let config = &mut self.config;
        debug!("Applying CLI overrides to configuration");

        if let Some(mode) = run_cmd.mode {
            debug!("Overriding mode from CLI: {:?}", mode);
            config.mode = mode;
        }

        let transfer = &run_cmd.transfer_args;
        if let Some(program) = &transfer.program {
            debug!("Overriding transfer.program from CLI: {}", program);
            config.transfer.program = program.clone();
        }
        if let Some(args) = &transfer.program_args {
            debug!("Overriding transfer.args from CLI: {:?}", args);
            config.transfer.args = args.clone();
        }
        if let Some(char_limit) = transfer.char_limit {
            debug!("Overriding transfer.char_limit from CLI: {}", char_limit);
            config.transfer.char_limit = char_limit;
        }
        if let Some(max_attempts) = transfer.max_attempts {
            debug!("Overriding transfer.max_attempts from CLI: {}", max_attempts);
            config.transfer.max_attempts = max_attempts;
        }
        if let Some(site_filter) = &transfer.site_filter {
            debug!("Overriding transfer.site_filter from CLI: {}", site_filter);
            config.transfer.site_filter = site_filter.clone();
        }

        if let Some(policy) = run_cmd.archive_args.archive_policy {
            debug!("Overriding archive.policy from CLI: {}", policy);
            config.archive.policy = policy;
        }
        if run_cmd.archive_args.keep_logfile {
            debug!("Overriding archive.archive_logfile from CLI: false");
            config.archive.archive_logfile = false;
        }

        self
    }

    /// Validate and return the final configuration
    pub fn build(self) -> Result<DutyConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Build the effective configuration for a run command
pub fn load_config_from_run_cmd(run_cmd: &RunCmd) -> Result<DutyConfig> {
    let builder = match &run_cmd.config_file {
        Some(path) => ConfigBuilder::new().with_config_file(path)?,
        None => {
            info!("No config file given, using built-in defaults");
            ConfigBuilder::new()
        }
    };
    builder.with_cli_overrides(run_cmd).build()
}
