use tracing::{info, warn};

use super::retry::{RetryRunner, RunOutcome};
use super::run_log::RunLog;
use super::transfer::TransferClient;
use crate::config::TransferConfig;
use crate::error::TransferError;
use crate::types::constant::JOB_DELIMITER;
use crate::types::{Batch, FailedBatch, RunContext};

/// Splits a delimited job-list string into batches whose arguments stay near `char_limit`.
///
/// The number of batches is `ceil(len / char_limit)` counted in characters. Segments
/// are distributed in order, the first `segments % count` batches taking one extra.
/// A segment is never split, so with fewer segments than batches the surplus batches
/// are not produced.
pub fn chunk_job_list(job_list: &str, char_limit: usize) -> Vec<Batch> {
    let segments: Vec<String> =
        job_list.split(JOB_DELIMITER).filter(|segment| !segment.is_empty()).map(str::to_string).collect();
    if segments.is_empty() {
        return Vec::new();
    }

    let count = job_list.chars().count().div_ceil(char_limit.max(1));
    if count <= 1 {
        return vec![Batch::new(1, segments)];
    }
    split_near_equal(segments, count)
        .into_iter()
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(i, part)| Batch::new(i + 1, part))
        .collect()
}

fn split_near_equal<T>(items: Vec<T>, parts: usize) -> Vec<Vec<T>> {
    let base = items.len() / parts;
    let extra = items.len() % parts;
    let mut items = items.into_iter();
    (0..parts).map(|i| items.by_ref().take(base + usize::from(i < extra)).collect()).collect()
}

/// Sends each batch of a run through the [`RetryRunner`]
pub struct ChunkedDispatcher<'a> {
    client: &'a dyn TransferClient,
    config: &'a TransferConfig,
}

impl<'a> ChunkedDispatcher<'a> {
    pub fn new(client: &'a dyn TransferClient, config: &'a TransferConfig) -> Self {
        Self { client, config }
    }

    pub fn prepare(&self, job_list: &str) -> Vec<Batch> {
        let batches = chunk_job_list(job_list, self.config.char_limit);
        info!(
            chars = job_list.chars().count(),
            char_limit = self.config.char_limit,
            batches = batches.len(),
            "Split job list into batches"
        );
        batches
    }

    /// Command lines for `batches`, in dispatch order
    pub fn command_lines(&self, batches: &[Batch]) -> Vec<String> {
        batches.iter().map(|batch| self.client.command_line(&batch.argument())).collect()
    }

    /// Runs every batch in order. Successful output is appended to the audit text;
    /// batches that could not be invoked go to the failure catalogue.
    ///
    /// Stops at the first batch that exhausts its attempts.
    pub async fn dispatch(&self, ctx: &mut RunContext, run_log: &mut RunLog) -> Result<(), TransferError> {
        if ctx.batches.is_empty() {
            run_log.info("No transfer jobs to dispatch");
            return Ok(());
        }

        let runner = RetryRunner::new(self.client, self.config.max_attempts);
        let total = ctx.batches.len();
        for batch in ctx.batches.clone() {
            info!(batch = batch.index, total, segments = batch.len(), "Dispatching batch");
            let argument = batch.argument();
            match runner.run(&argument, run_log).await? {
                RunOutcome::Succeeded { output, .. } => {
                    ctx.audit_text.push_str(&output);
                    ctx.audit_text.push('\n');
                }
                RunOutcome::InvocationFailed { error } => {
                    warn!(batch = batch.index, error = %error, "Batch recorded as failed");
                    ctx.failures.push(FailedBatch {
                        index: batch.index,
                        command: self.client.command_line(&argument),
                        reason: error.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
