use clap::Args;

use crate::config::ArchivePolicy;

#[derive(Debug, Clone, Args, Default)]
pub struct ArchiveCliArgs {
    /// How a processed manifest is archived
    #[arg(env = "DUTY_TRANSFER_ARCHIVE_POLICY", long, value_enum)]
    pub archive_policy: Option<ArchivePolicy>,

    /// Leave the run log in process_logs/ instead of archiving it with the manifest
    #[arg(env = "DUTY_TRANSFER_KEEP_LOGFILE", long)]
    pub keep_logfile: bool,
}
