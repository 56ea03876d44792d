use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    /// The operator declined to answer
    #[error("The user closed the input for {label:?} without providing a value")]
    Cancelled { label: String },

    #[error("Failed to read user input for {label:?}: {source}")]
    Io { label: String, source: std::io::Error },

    /// A folder built from fixed configuration does not exist, so asking again cannot help
    #[error("The directory {path} does not exist")]
    MissingDirectory { path: String },
}
