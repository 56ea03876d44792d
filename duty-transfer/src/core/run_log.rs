use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::Level;

use crate::error::TransferError;

/// Per-manifest logfile. Every line is also emitted as a tracing event, so the
/// console and the file see the same messages.
///
/// The handle is released around each transfer invocation because the transfer
/// program may write into the same directory.
#[derive(Debug)]
pub struct RunLog {
    path: PathBuf,
    file: Option<File>,
    reopened: usize,
}

impl RunLog {
    pub fn open(path: &Path) -> Result<Self, TransferError> {
        let file = open_append(path)?;
        Ok(Self { path: path.to_path_buf(), file: Some(file), reopened: 0 })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Number of times the handle has been reacquired after a close
    pub fn reopen_count(&self) -> usize {
        self.reopened
    }

    pub fn close(&mut self) -> Result<(), TransferError> {
        if let Some(mut file) = self.file.take() {
            file.flush().map_err(|source| TransferError::RunLog { path: self.path.display().to_string(), source })?;
        }
        Ok(())
    }

    pub fn reopen(&mut self) -> Result<(), TransferError> {
        if self.file.is_none() {
            self.file = Some(open_append(&self.path)?);
            self.reopened += 1;
        }
        Ok(())
    }

    /// Point the log at a new location after its file was moved, and reopen it there
    pub fn relocate(&mut self, path: &Path) -> Result<(), TransferError> {
        self.close()?;
        self.path = path.to_path_buf();
        self.reopen()
    }

    pub fn info(&mut self, message: impl AsRef<str>) {
        self.record(Level::INFO, message.as_ref());
    }

    pub fn warn(&mut self, message: impl AsRef<str>) {
        self.record(Level::WARN, message.as_ref());
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        self.record(Level::ERROR, message.as_ref());
    }

    /// Append text verbatim, without a timestamp or a tracing event
    pub fn append_raw(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut text = text.to_string();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        self.write(&text);
    }

    fn record(&mut self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!("{}", message),
            Level::WARN => tracing::warn!("{}", message),
            Level::DEBUG => tracing::debug!("{}", message),
            Level::TRACE => tracing::trace!("{}", message),
            _ => tracing::info!("{}", message),
        }
        let line = format!("{} - {} - {}\n", Local::now().format("%Y-%m-%d %H:%M:%S"), level, message);
        self.write(&line);
    }

    fn write(&mut self, text: &str) {
        // Lines written while the handle is released open it lazily
        if self.file.is_none() {
            if let Err(e) = self.reopen() {
                tracing::warn!(error = %e, "Run log unavailable, line dropped");
                return;
            }
        }
        if let Some(file) = self.file.as_mut() {
            if let Err(e) = file.write_all(text.as_bytes()) {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to write to run log");
            }
        }
    }
}

fn open_append(path: &Path) -> Result<File, TransferError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| TransferError::RunLog { path: path.display().to_string(), source })
}
