use std::path::{Path, PathBuf};

use tracing::warn;

use super::run_log::RunLog;
use crate::config::{ArchiveConfig, ArchivePolicy};
use crate::error::ArchiveError;
use crate::types::run_context::finished_timestamp;
use crate::types::{Disposition, RunContext};

/// Decides where a finished manifest ends up and moves it there
pub struct ArchiveTransition<'a> {
    config: &'a ArchiveConfig,
}

impl<'a> ArchiveTransition<'a> {
    pub fn new(config: &'a ArchiveConfig) -> Self {
        Self { config }
    }

    /// Where the manifest goes when every batch succeeded
    pub fn manifest_target(&self, ctx: &RunContext) -> PathBuf {
        match self.config.policy {
            ArchivePolicy::Move => ctx.paths.archive_dir.join(&ctx.name.file_name),
            ArchivePolicy::Stamped => ctx
                .paths
                .archive_dir
                .join(format!("Processed_on_{}{}", finished_timestamp(ctx.started_at), ctx.name.file_name)),
        }
    }

    /// Leaves the manifest in place when any batch failed, archives it otherwise.
    /// On error the manifest is back at its original path.
    pub fn finish(&self, ctx: &mut RunContext, run_log: &mut RunLog) -> Result<(), ArchiveError> {
        if !ctx.failures.is_empty() {
            for failed in &ctx.failures {
                run_log.error(format!(
                    "The following command did not execute successfully: {} ({})",
                    failed.command, failed.reason
                ));
            }
            run_log.warn(format!("{} left in place for a rerun", ctx.manifest_path.display()));
            ctx.disposition = Disposition::PartialFailure { failed: ctx.failures.clone() };
            return Ok(());
        }

        let target = self.manifest_target(ctx);
        move_file(&ctx.manifest_path, &target)?;

        if self.config.archive_logfile {
            self.archive_logfile(ctx, &target, run_log)?;
        }

        run_log.info(format!("Success - {} moved to {}", ctx.manifest_path.display(), target.display()));
        ctx.disposition = Disposition::Archived { archived_to: target };
        Ok(())
    }

    fn archive_logfile(&self, ctx: &RunContext, archived: &Path, run_log: &mut RunLog) -> Result<(), ArchiveError> {
        let logfile = run_log.path().to_path_buf();
        let file_name = logfile
            .file_name()
            .ok_or_else(|| ArchiveError::NoFileName { path: logfile.display().to_string() })?;
        let log_target = ctx.paths.archive_dir.join(file_name);

        let moved = run_log.close().map_err(ArchiveError::from).and_then(|()| move_file(&logfile, &log_target));
        match moved {
            Ok(()) => {
                if let Err(e) = run_log.relocate(&log_target) {
                    warn!(error = %e, "Run log moved but could not be reopened");
                }
                Ok(())
            }
            Err(cause) => {
                if let Err(e) = run_log.reopen() {
                    warn!(error = %e, "Run log could not be reopened after a failed move");
                }
                let manifest = ctx.manifest_path.display().to_string();
                match std::fs::rename(archived, &ctx.manifest_path) {
                    Ok(()) => Err(ArchiveError::RolledBack { manifest, cause: Box::new(cause) }),
                    Err(restore) => Err(ArchiveError::RollbackFailed { manifest, cause: Box::new(cause), restore }),
                }
            }
        }
    }
}

/// Renames `from` to `to`, refusing to replace an existing file
fn move_file(from: &Path, to: &Path) -> Result<(), ArchiveError> {
    if to.exists() {
        return Err(ArchiveError::TargetExists { from: from.display().to_string(), to: to.display().to_string() });
    }
    std::fs::rename(from, to).map_err(|source| ArchiveError::Rename {
        from: from.display().to_string(),
        to: to.display().to_string(),
        source,
    })
}
