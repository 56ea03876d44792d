pub mod process;

use async_trait::async_trait;

use crate::error::TransferError;
pub use process::ProcessTransferClient;

/// What one invocation of the transfer program produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// stdout followed by stderr, decoded lossily
    pub output: String,
}

impl TransferOutput {
    pub fn new(exit_code: i32, output: impl Into<String>) -> Self {
        Self { exit_code: Some(exit_code), output: output.into() }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait defining the external transfer mechanism
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransferClient: Send + Sync {
    /// Run the transfer program once with `argument` as its last positional argument
    ///
    /// # Returns
    /// * `Ok(TransferOutput)` - The program ran to completion, whatever its exit code
    /// * `Err(TransferError::Invocation)` - The program could not be started or awaited
    async fn invoke(&self, argument: &str) -> Result<TransferOutput, TransferError>;

    /// The command line `invoke` runs, for logs and the commands file
    fn command_line(&self, argument: &str) -> String;
}
