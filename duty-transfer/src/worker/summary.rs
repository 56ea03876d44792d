use std::path::PathBuf;

use tracing::{info, warn};

use crate::core::TransferPlan;
use crate::types::{Batch, Disposition, ManifestName, ScriptMode};

/// Outcome of one processed manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestReport {
    pub manifest: PathBuf,
    pub mode: ScriptMode,
    pub disposition: Disposition,
}

/// Outcome of every manifest handled in one invocation
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<ManifestReport>,
}

impl RunSummary {
    pub fn record(&mut self, report: ManifestReport) {
        self.reports.push(report);
    }

    pub fn archived(&self) -> usize {
        self.reports.iter().filter(|r| matches!(r.disposition, Disposition::Archived { .. })).count()
    }

    /// Archive failures make the process exit non-zero
    pub fn has_archive_failures(&self) -> bool {
        self.reports.iter().any(|r| matches!(r.disposition, Disposition::ArchiveFailed { .. }))
    }

    pub fn log(&self) {
        info!(total = self.reports.len(), archived = self.archived(), "Run finished");
        for report in &self.reports {
            match &report.disposition {
                Disposition::Archived { archived_to } => {
                    info!(manifest = %report.manifest.display(), to = %archived_to.display(), "Archived")
                }
                Disposition::PartialFailure { failed } => warn!(
                    manifest = %report.manifest.display(),
                    failed_batches = failed.len(),
                    "Left in place after failed batches"
                ),
                Disposition::Skipped { reason } => {
                    warn!(manifest = %report.manifest.display(), reason = %reason, "Skipped")
                }
                Disposition::ArchiveFailed { reason } => {
                    warn!(manifest = %report.manifest.display(), reason = %reason, "Archive failed")
                }
                Disposition::InProgress => {
                    warn!(manifest = %report.manifest.display(), "Processing did not reach a decision")
                }
            }
        }
    }
}

/// What `plan` shows for one manifest
#[derive(Debug, Clone)]
pub struct ManifestPreview {
    pub name: ManifestName,
    pub mode: ScriptMode,
    pub plan: TransferPlan,
    pub batches: Vec<Batch>,
    pub command_lines: Vec<String>,
}
