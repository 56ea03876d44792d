use anyhow::{bail, Result};

use super::{DutyConfig, TransferConfig};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for TransferConfig {
    fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            bail!("transfer.program must not be empty");
        }
        if self.char_limit == 0 {
            bail!("transfer.char_limit must be greater than 0");
        }
        if self.max_attempts == 0 {
            bail!("transfer.max_attempts must be at least 1");
        }
        if self.site_filter.is_empty() {
            bail!("transfer.site_filter must not be empty");
        }
        Ok(())
    }
}

impl Validate for DutyConfig {
    fn validate(&self) -> Result<()> {
        self.transfer.validate()?;
        if self.roots.test == self.roots.prod {
            tracing::warn!(root = %self.roots.prod.display(), "TEST and PROD roots are the same folder");
        }
        Ok(())
    }
}
