use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{TransferClient, TransferOutput};
use crate::config::TransferConfig;
use crate::error::TransferError;

/// Runs the configured program as a child process and waits for it, without a timeout
#[derive(Debug, Clone)]
pub struct ProcessTransferClient {
    config: TransferConfig,
}

impl ProcessTransferClient {
    pub fn new(config: TransferConfig) -> Self {
        Self { config }
    }

    fn to_command(&self, argument: &str) -> Command {
        let mut command = Command::new(&self.config.program);
        command.args(&self.config.args).arg(argument);
        command.kill_on_drop(true);
        command
    }
}

#[async_trait]
impl TransferClient for ProcessTransferClient {
    async fn invoke(&self, argument: &str) -> Result<TransferOutput, TransferError> {
        debug!(program = %self.config.program, argument_len = argument.len(), "Spawning transfer program");
        let output = self
            .to_command(argument)
            .output()
            .await
            .map_err(|source| TransferError::Invocation { program: self.config.program.clone(), source })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(TransferOutput { exit_code: output.status.code(), output: combined })
    }

    fn command_line(&self, argument: &str) -> String {
        self.config.command_line(argument)
    }
}
