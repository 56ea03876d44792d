/// Separates `url,destination` segments inside a job-list string.
/// Chosen so that it never occurs in a URL or a Windows/UNC path.
pub const JOB_DELIMITER: &str = "£$%";

/// Character limit for a single transfer command argument
pub const DEFAULT_CHAR_LIMIT: usize = 8000;

/// Attempts per batch before the run is aborted
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Manifests containing this substring are processed against the TEST root
pub const TEST_MODE_SENTINEL: &str = "testing";

/// URL substring routing a job to the secondary (St George's) site
pub const DEFAULT_SITE_FILTER: &str = "StG";

pub const ARCHIVE_DIR_NAME: &str = "archive";
pub const CMDS_DIR_NAME: &str = "cmds_logs";
pub const LOGS_DIR_NAME: &str = "process_logs";

pub const WORKSHEETS_DIR_LABEL: &str =
    "Please input the NGS worksheets runfolder directory without quotation marks, e.g.: NGS_501 to 600";
pub const RUNFOLDER_DIR_LABEL: &str =
    "Please input the final part of the destination folder without quotation marks, e.g.: NGS451 or TSO12345";

/// Version of duty-transfer
pub const DUTY_TRANSFER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// First line of every audit log
pub fn generate_version_header() -> String {
    format!("Version {}\n", DUTY_TRANSFER_VERSION)
}
