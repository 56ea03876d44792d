pub mod archive;
pub mod manifest;
pub mod planning;
pub mod prompt;
pub mod transfer;

use thiserror::Error;

pub use archive::ArchiveError;
pub use manifest::ManifestError;
pub use planning::PlanningError;
pub use prompt::PromptError;
pub use transfer::TransferError;

/// Result type for duty-transfer operations
pub type DutyResult<T> = Result<T, DutyError>;

/// Error types for the duty-transfer run
#[derive(Error, Debug)]
pub enum DutyError {
    #[error("Manifest error: {0}")]
    ManifestError(#[from] ManifestError),

    #[error("Planning error: {0}")]
    PlanningError(#[from] PlanningError),

    #[error("Prompt error: {0}")]
    PromptError(#[from] PromptError),

    #[error("Transfer error: {0}")]
    TransferError(#[from] TransferError),

    #[error("Archive error: {0}")]
    ArchiveError(#[from] ArchiveError),

    /// No manifest was provided and none could be discovered
    #[error("No manifest to process: {0}")]
    NoManifest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error while creating a directory from the directory plan
    #[error("Failed to create directory {path}: {source}")]
    DirectoryError { path: String, source: std::io::Error },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Duty transfer error: {0}")]
    DutyAnyhowError(#[from] anyhow::Error),
}

impl DutyError {
    /// Errors that end the processing of the current manifest only.
    /// Every other error aborts the whole run.
    pub fn is_manifest_scoped(&self) -> bool {
        matches!(self, DutyError::PlanningError(_) | DutyError::ArchiveError(_))
    }
}
