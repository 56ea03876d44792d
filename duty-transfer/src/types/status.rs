use serde::{Deserialize, Serialize};

/// Lifecycle of one transfer command
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum CommandStatus {
    /// The command has been planned and not started
    Pending,
    /// The transfer program is executing
    Running,
    /// The program exited with code 0
    Success,
    /// The program exited non-zero and attempts remain
    Retrying,
    /// The program exited non-zero on the last allowed attempt
    Fatal,
}

impl CommandStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CommandStatus::Success | CommandStatus::Fatal)
    }
}
