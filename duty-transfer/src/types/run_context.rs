use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::batch::{Batch, FailedBatch};
use super::constant::{generate_version_header, ARCHIVE_DIR_NAME, CMDS_DIR_NAME, LOGS_DIR_NAME};
use super::mode::ScriptMode;
use super::project::{ManifestName, ProjectType};

/// Values collected from the operator for placeholder tokens, at most once each
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    /// NGS worksheets range, e.g. `NGS_501 to 600`
    pub worksheets_dir: Option<String>,
    /// Final destination folder, e.g. `NGS451`
    pub runfolder_dir: Option<String>,
}

/// Filesystem layout of one run under the selected root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub root: PathBuf,
    pub archive_dir: PathBuf,
    pub cmds_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub logfile: PathBuf,
    pub commands_file: PathBuf,
    pub audit_log: PathBuf,
}

impl RunPaths {
    pub fn new(root: &Path, name: &ManifestName, started_at: DateTime<Local>) -> Self {
        let compact = compact_timestamp(started_at);
        let archive_dir = root.join(ARCHIVE_DIR_NAME);
        let cmds_dir = root.join(CMDS_DIR_NAME);
        let logs_dir = root.join(LOGS_DIR_NAME);
        Self {
            logfile: logs_dir.join(format!("{}.process_duty_{}.log", name.stem, compact)),
            commands_file: cmds_dir.join(format!("{}.transfer_cmds_{}.txt", name.stem, compact)),
            audit_log: logs_dir.join(format!("Finished_on_{}_{}.txt", finished_timestamp(started_at), name.stem)),
            root: root.to_path_buf(),
            archive_dir,
            cmds_dir,
            logs_dir,
        }
    }

    /// The fixed subdirectories every run writes into
    pub fn layout_dirs(&self) -> [&Path; 3] {
        [&self.archive_dir, &self.cmds_dir, &self.logs_dir]
    }
}

/// Final state of one manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Still being processed
    InProgress,
    /// Every batch succeeded and the manifest moved to the archive
    Archived { archived_to: PathBuf },
    /// Some batches failed; the manifest stays in place
    PartialFailure { failed: Vec<FailedBatch> },
    /// Planning refused the manifest; nothing was created or dispatched
    Skipped { reason: String },
    /// All batches succeeded but the archive move did not complete
    ArchiveFailed { reason: String },
}

/// Per-manifest state. Built when processing of a manifest starts, dropped after the archive decision.
#[derive(Debug)]
pub struct RunContext {
    pub manifest_path: PathBuf,
    pub name: ManifestName,
    pub mode: ScriptMode,
    pub started_at: DateTime<Local>,
    pub paths: RunPaths,
    pub placeholders: Placeholders,
    pub batches: Vec<Batch>,
    pub audit_text: String,
    pub failures: Vec<FailedBatch>,
    pub disposition: Disposition,
}

impl RunContext {
    pub fn new(manifest_path: PathBuf, name: ManifestName, mode: ScriptMode, root: &Path) -> Self {
        let started_at = Local::now();
        let paths = RunPaths::new(root, &name, started_at);
        Self {
            manifest_path,
            name,
            mode,
            started_at,
            paths,
            placeholders: Placeholders::default(),
            batches: Vec::new(),
            audit_text: generate_version_header(),
            failures: Vec::new(),
            disposition: Disposition::InProgress,
        }
    }

    pub fn project(&self) -> ProjectType {
        self.name.project
    }
}

/// `20240131_154500`
pub fn compact_timestamp(at: DateTime<Local>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

/// `2024_01_31__15_45_00_`, used in audit log and archive stamps
pub fn finished_timestamp(at: DateTime<Local>) -> String {
    at.format("%Y_%m_%d__%H_%M_%S_").to_string()
}
