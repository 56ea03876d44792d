pub mod archive;
pub mod audit;
pub mod dispatcher;
pub mod manifest;
pub mod planner;
pub mod prompt;
pub mod resolver;
pub mod retry;
pub mod run_log;
pub mod transfer;

pub use archive::ArchiveTransition;
pub use dispatcher::{chunk_job_list, ChunkedDispatcher};
pub use manifest::{discover_manifests, Manifest, ManifestRow};
pub use planner::{ensure_directories, BatchPlanner, TransferPlan};
pub use prompt::{Prompt, TerminalPrompt};
pub use resolver::PathResolver;
pub use retry::{RetryRunner, RunOutcome};
pub use run_log::RunLog;
pub use transfer::{ProcessTransferClient, TransferClient, TransferOutput};
