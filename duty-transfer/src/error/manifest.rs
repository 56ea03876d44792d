use thiserror::Error;

/// Errors raised while reading a manifest or its filename metadata
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Unreadable { path: String, source: std::io::Error },

    #[error("Failed to parse manifest {path} as a table: {source}")]
    Malformed { path: String, source: csv::Error },

    /// A required column is absent from the header row
    #[error("Manifest {path} is missing the required column {column:?}")]
    MissingColumn { path: String, column: String },

    /// The `GSTT_dir` cell looked like a list literal but could not be parsed
    #[error("Manifest {path} row {row} has a malformed destination list: {value}")]
    MalformedDestinationList { path: String, row: usize, value: String },

    /// The filename has no `__<Project>__` token
    #[error("Manifest filename {name:?} does not contain a project token such as __WES__")]
    MissingProjectToken { name: String },

    #[error("Manifest filename {name:?} names an unsupported project {project:?}")]
    UnknownProject { name: String, project: String },

    /// Filename metadata needed to lay out destinations is absent
    #[error("Manifest filename {name:?} does not contain the {what}")]
    MissingFilenameField { name: String, what: &'static str },
}
