pub mod terminal;

use async_trait::async_trait;

use crate::error::PromptError;
pub use terminal::TerminalPrompt;

/// Source of operator input for placeholder values
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Prompt: Send + Sync {
    /// Block until the operator answers `label`, or fail with [`PromptError::Cancelled`]
    async fn ask(&self, label: &str) -> Result<String, PromptError>;
}
