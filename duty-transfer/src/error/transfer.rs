use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransferError {
    /// The transfer program could not be started or awaited
    #[error("Failed to invoke {program}: {source}")]
    Invocation { program: String, source: std::io::Error },

    /// Every attempt exited non-zero
    #[error("Command {command:?} failed after {attempts} attempts")]
    RetriesExhausted { command: String, attempts: u32 },

    #[error("Failed to write run log {path}: {source}")]
    RunLog { path: String, source: std::io::Error },

    #[error("Failed to write {what} {path}: {source}")]
    AuditWrite { what: &'static str, path: String, source: std::io::Error },
}
