use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::TransferError;

/// Writes the audit text of a finished run. The file must not exist yet.
pub fn write_audit_log(path: &Path, audit_text: &str) -> Result<(), TransferError> {
    write_new("audit log", path, audit_text)?;
    info!(path = %path.display(), "Audit log written");
    Ok(())
}

/// Records the planned command lines, one per line, before any of them runs
pub fn write_commands_file(path: &Path, command_lines: &[String]) -> Result<(), TransferError> {
    let mut content = command_lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    write_new("commands file", path, &content)
}

fn write_new(what: &'static str, path: &Path, content: &str) -> Result<(), TransferError> {
    let error = |source| TransferError::AuditWrite { what, path: path.display().to_string(), source };
    let mut file = OpenOptions::new().write(true).create_new(true).open(path).map_err(error)?;
    file.write_all(content.as_bytes()).map_err(error)?;
    file.flush().map_err(error)
}
