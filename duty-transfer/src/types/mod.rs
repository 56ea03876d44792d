pub mod batch;
pub mod constant;
pub mod job;
pub mod mode;
pub mod project;
pub mod run_context;
pub mod status;

pub use batch::{Batch, FailedBatch};
pub use job::{JobDescriptor, JobList, Site};
pub use mode::{ModeSelection, ScriptMode};
pub use project::{ManifestName, ProjectType};
pub use run_context::{Disposition, Placeholders, RunContext, RunPaths};
pub use status::CommandStatus;
