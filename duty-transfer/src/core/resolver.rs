use std::path::PathBuf;

use tracing::{info, warn};

use super::prompt::Prompt;
use crate::error::PromptError;
use crate::types::constant::{RUNFOLDER_DIR_LABEL, WORKSHEETS_DIR_LABEL};
use crate::types::Placeholders;

/// Stands for `<worksheets range>/<run folder>`
pub const PAIR_TOKEN: &str = "%s%s";
/// Stands for `<run folder>`
pub const SINGLE_TOKEN: &str = "%s";

/// Substitutes placeholder tokens in destination templates. Each value is asked
/// for the first time a template needs it and reused for the rest of the manifest.
pub struct PathResolver<'a> {
    prompt: &'a dyn Prompt,
    values: &'a mut Placeholders,
}

impl<'a> PathResolver<'a> {
    pub fn new(prompt: &'a dyn Prompt, values: &'a mut Placeholders) -> Self {
        Self { prompt, values }
    }

    pub fn placeholders(&self) -> &Placeholders {
        &*self.values
    }

    pub async fn resolve(&mut self, template: &str) -> Result<String, PromptError> {
        let mut resolved = template.to_string();
        if resolved.contains(PAIR_TOKEN) {
            let worksheets = self.worksheets_dir().await?;
            let runfolder = self.runfolder_dir().await?;
            resolved = resolved.replace(PAIR_TOKEN, &format!("{}/{}", worksheets, runfolder));
        }
        if resolved.contains(SINGLE_TOKEN) {
            let runfolder = self.runfolder_dir().await?;
            resolved = resolved.replace(SINGLE_TOKEN, &runfolder);
        }
        Ok(resolved)
    }

    /// Resolves `template` to a folder that must already exist. While it does not, the
    /// values it used are forgotten and asked again, so a mistyped answer never names
    /// a new folder.
    pub async fn resolve_existing_dir(&mut self, template: &str) -> Result<PathBuf, PromptError> {
        loop {
            let resolved = PathBuf::from(self.resolve(template).await?);
            if resolved.is_dir() {
                return Ok(resolved);
            }
            warn!("The directory {} does not exist. Please try again!", resolved.display());
            if template.contains(PAIR_TOKEN) {
                self.values.worksheets_dir = None;
            }
            if template.contains(SINGLE_TOKEN) {
                self.values.runfolder_dir = None;
            } else {
                // Nothing to ask again
                return Err(PromptError::MissingDirectory { path: resolved.display().to_string() });
            }
        }
    }

    pub async fn worksheets_dir(&mut self) -> Result<String, PromptError> {
        if let Some(value) = &self.values.worksheets_dir {
            return Ok(value.clone());
        }
        let value = self.ask(WORKSHEETS_DIR_LABEL).await?;
        self.values.worksheets_dir = Some(value.clone());
        Ok(value)
    }

    pub async fn runfolder_dir(&mut self) -> Result<String, PromptError> {
        if let Some(value) = &self.values.runfolder_dir {
            return Ok(value.clone());
        }
        let value = self.ask(RUNFOLDER_DIR_LABEL).await?;
        self.values.runfolder_dir = Some(value.clone());
        Ok(value)
    }

    async fn ask(&self, label: &str) -> Result<String, PromptError> {
        loop {
            let answer = self.prompt.ask(label).await?;
            let answer = answer.trim().trim_matches(|c| c == '"' || c == '\'');
            if !answer.is_empty() {
                info!("The following user input was collected: {}", answer);
                return Ok(answer.to_string());
            }
            warn!("Empty answer, asking again");
        }
    }
}
