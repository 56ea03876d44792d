use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

use super::Prompt;
use crate::error::PromptError;

/// Reads answers from stdin. End of input counts as cancellation.
pub struct TerminalPrompt {
    stdin: Mutex<BufReader<tokio::io::Stdin>>,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self { stdin: Mutex::new(BufReader::new(tokio::io::stdin())) }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prompt for TerminalPrompt {
    async fn ask(&self, label: &str) -> Result<String, PromptError> {
        let io_error = |source| PromptError::Io { label: label.to_string(), source };

        let mut stderr = tokio::io::stderr();
        stderr.write_all(format!("{}\n> ", label).as_bytes()).await.map_err(io_error)?;
        stderr.flush().await.map_err(io_error)?;

        let mut line = String::new();
        let read = self.stdin.lock().await.read_line(&mut line).await.map_err(io_error)?;
        if read == 0 {
            return Err(PromptError::Cancelled { label: label.to_string() });
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
