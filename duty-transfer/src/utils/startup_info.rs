//! Startup information logging
//!
//! Logs the effective configuration once, before the first manifest is touched.

use std::path::Path;

use tracing::info;

use crate::config::DutyConfig;
use crate::types::constant::DUTY_TRANSFER_VERSION;

/// Log the effective configuration
pub fn log_startup_info(config: &DutyConfig, manifest: Option<&Path>) {
    info!("═══════════════════════════════════════════════════════════════════");
    info!("                  Duty Transfer {} Starting", DUTY_TRANSFER_VERSION);
    info!("═══════════════════════════════════════════════════════════════════");

    log_mode_config(config, manifest);
    log_destinations_config(config);
    log_transfer_config(config);
    log_archive_config(config);

    info!("═══════════════════════════════════════════════════════════════════");
}

fn log_mode_config(config: &DutyConfig, manifest: Option<&Path>) {
    info!("┌─ Mode");
    info!("│  Selection: {}", config.mode);
    info!("│  TEST Root: {}", config.roots.test.display());
    info!("│  PROD Root: {}", config.roots.prod.display());
    match manifest {
        Some(path) => info!("│  Manifest: {}", path.display()),
        None => info!("│  Manifest: discover in selected root"),
    }
    info!("└─");
}

fn log_destinations_config(config: &DutyConfig) {
    let show = |value: &Option<std::path::PathBuf>| {
        value.as_ref().map_or_else(|| "(not configured)".to_string(), |p| p.display().to_string())
    };
    let destinations = &config.destinations;
    info!("┌─ Destinations");
    info!("│  WES: {}", show(&destinations.wes));
    info!("│  SNP: {}", show(&destinations.snp));
    info!("│  TSO500 Results: {}", show(&destinations.tso500_results));
    if !destinations.tso500_folder_suffix.is_empty() {
        info!("│  TSO500 Folder Suffix: {}", destinations.tso500_folder_suffix);
    }
    info!("│  MokaPipe Worksheets: {}", show(&destinations.mokapipe_worksheets));
    info!("│  Secondary Site Transfer: {}", show(&destinations.secondary_site_transfer));
    info!("└─");
}

fn log_transfer_config(config: &DutyConfig) {
    let transfer = &config.transfer;
    info!("┌─ Transfer Command");
    info!("│  Program: {}", transfer.program);
    if !transfer.args.is_empty() {
        info!("│  Fixed Arguments: {}", transfer.args.join(" "));
    }
    info!("│  Character Limit: {}", transfer.char_limit);
    info!("│  Max Attempts: {}", transfer.max_attempts);
    info!("│  Secondary Site Filter: {}", transfer.site_filter);
    info!("└─");
}

fn log_archive_config(config: &DutyConfig) {
    info!("┌─ Archive");
    info!("│  Policy: {}", config.archive.policy);
    info!("│  Archive Run Log: {}", config.archive.archive_logfile);
    info!("└─");
}
