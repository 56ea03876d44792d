use thiserror::Error;

use super::transfer::TransferError;

#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Archiving never overwrites an earlier archived file
    #[error("Cannot archive {from} to {to}: target already exists")]
    TargetExists { from: String, to: String },

    #[error("Failed to move {from} to {to}: {source}")]
    Rename { from: String, to: String, source: std::io::Error },

    /// The log move failed and the manifest move was undone
    #[error("Archived {manifest} but moving the run log failed ({cause}); the manifest was restored")]
    RolledBack { manifest: String, cause: Box<ArchiveError> },

    /// The log move failed and the manifest could not be restored either
    #[error("Archived {manifest} but moving the run log failed ({cause}); restoring the manifest also failed: {restore}")]
    RollbackFailed { manifest: String, cause: Box<ArchiveError>, restore: std::io::Error },

    #[error("Manifest path {path} has no file name")]
    NoFileName { path: String },

    #[error("Failed to release the run log before archiving: {0}")]
    RunLog(#[from] TransferError),
}
