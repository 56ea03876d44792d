use tracing::debug;

use super::run_log::RunLog;
use super::transfer::TransferClient;
use crate::error::TransferError;
use crate::types::CommandStatus;

/// How a command that did not exhaust its attempts ended
#[derive(Debug)]
pub enum RunOutcome {
    Succeeded { output: String, attempts: u32 },
    /// The program could not be started. No attempt was consumed.
    InvocationFailed { error: TransferError },
}

/// Runs one transfer command until it exits 0 or the attempt budget is spent
pub struct RetryRunner<'a> {
    client: &'a dyn TransferClient,
    max_attempts: u32,
}

impl<'a> RetryRunner<'a> {
    pub fn new(client: &'a dyn TransferClient, max_attempts: u32) -> Self {
        Self { client, max_attempts }
    }

    /// # Returns
    /// * `Ok(RunOutcome::Succeeded)` - The program exited 0 within the budget
    /// * `Ok(RunOutcome::InvocationFailed)` - The program could not be run at all
    /// * `Err(TransferError::RetriesExhausted)` - Every attempt exited non-zero
    pub async fn run(&self, argument: &str, run_log: &mut RunLog) -> Result<RunOutcome, TransferError> {
        let command_line = self.client.command_line(argument);
        let mut status = CommandStatus::Pending;
        let mut attempt: u32 = 1;
        run_log.info(format!("Running the following command: {}", command_line));

        loop {
            status = transition(status, CommandStatus::Running, attempt);

            run_log.close()?;
            let result = self.client.invoke(argument).await;
            run_log.reopen()?;

            let output = match result {
                Ok(output) => output,
                Err(error) => {
                    run_log.error(format!("{} was raised when running the command: {}", error, command_line));
                    return Ok(RunOutcome::InvocationFailed { error });
                }
            };
            run_log.append_raw(&output.output);

            if output.success() {
                transition(status, CommandStatus::Success, attempt);
                run_log.info("Command executed without error. Returncode: 0");
                return Ok(RunOutcome::Succeeded { output: output.output, attempts: attempt });
            }

            let code = output.exit_code.map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string());
            run_log.error(format!("An error was encountered, with returncode {}", code));

            if attempt >= self.max_attempts {
                transition(status, CommandStatus::Fatal, attempt);
                run_log.error(format!("Command failed after {} attempts: {}", attempt, command_line));
                return Err(TransferError::RetriesExhausted { command: command_line, attempts: attempt });
            }

            status = transition(status, CommandStatus::Retrying, attempt);
            attempt += 1;
            run_log.info(format!("Trying again. Attempt {}", attempt));
        }
    }
}

fn transition(from: CommandStatus, to: CommandStatus, attempt: u32) -> CommandStatus {
    debug!(%from, %to, attempt, "Command status changed");
    to
}
