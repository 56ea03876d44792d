pub mod summary;

use std::path::{Path, PathBuf};

use itertools::Itertools;
use tracing::{info, warn};

use crate::config::DutyConfig;
use crate::core::audit::{write_audit_log, write_commands_file};
use crate::core::{
    discover_manifests, ensure_directories, ArchiveTransition, BatchPlanner, ChunkedDispatcher, Manifest,
    PathResolver, Prompt, RunLog, TransferClient, TransferPlan,
};
use crate::error::{DutyError, DutyResult, ManifestError};
use crate::types::constant::DUTY_TRANSFER_VERSION;
use crate::types::{Disposition, ManifestName, ModeSelection, Placeholders, RunContext, ScriptMode};
pub use summary::{ManifestPreview, ManifestReport, RunSummary};

/// Processes manifests one at a time, start to finish
pub struct ManifestWorker<'a> {
    config: &'a DutyConfig,
    prompt: &'a dyn Prompt,
    client: &'a dyn TransferClient,
}

impl<'a> ManifestWorker<'a> {
    pub fn new(config: &'a DutyConfig, prompt: &'a dyn Prompt, client: &'a dyn TransferClient) -> Self {
        Self { config, prompt, client }
    }

    /// Manifests to process: the given one, or every manifest found in the roots the mode selection allows
    pub fn manifests(&self, manifest: Option<&Path>) -> DutyResult<Vec<PathBuf>> {
        if let Some(path) = manifest {
            if !path.is_file() {
                return Err(DutyError::NoManifest(format!("{} does not exist", path.display())));
            }
            return Ok(vec![path.to_path_buf()]);
        }

        let roots: Vec<&Path> = match self.config.mode {
            ModeSelection::Test => vec![self.config.roots.test.as_path()],
            ModeSelection::Prod => vec![self.config.roots.prod.as_path()],
            ModeSelection::Auto => {
                vec![self.config.roots.prod.as_path(), self.config.roots.test.as_path()].into_iter().unique().collect()
            }
        };

        let mut found = Vec::new();
        for root in &roots {
            if !root.is_dir() {
                warn!(root = %root.display(), "Root folder does not exist, skipping");
                continue;
            }
            for (project, paths) in discover_manifests(root)? {
                info!(root = %root.display(), project = %project, count = paths.len(), "Found manifests");
                found.extend(paths);
            }
        }

        if found.is_empty() {
            return Err(DutyError::NoManifest(format!(
                "no manifest found in {}",
                roots.iter().map(|root| root.display()).join(", ")
            )));
        }
        Ok(found)
    }

    /// Processes every manifest in order. A fatal error stops the run after the
    /// outcomes so far have been logged.
    pub async fn run(&self, manifest: Option<&Path>) -> DutyResult<RunSummary> {
        let mut summary = RunSummary::default();
        for path in self.manifests(manifest)? {
            match self.process(&path).await {
                Ok(report) => summary.record(report),
                Err(e) => {
                    // Report what was already archived or skipped before the run stops
                    summary.log();
                    return Err(e);
                }
            }
        }
        Ok(summary)
    }

    /// Plans, dispatches and archives one manifest.
    ///
    /// Planning conflicts and archive failures end this manifest only and are
    /// reported in the [`ManifestReport`]. Every other error aborts the run.
    #[tracing::instrument(name = "manifest", skip_all, fields(manifest = %display_name(path)))]
    pub async fn process(&self, path: &Path) -> DutyResult<ManifestReport> {
        let content = read_manifest(path)?;
        let name = ManifestName::from_path(path)?;
        let mode = self.config.mode.resolve(&content);
        let mut ctx = RunContext::new(path.to_path_buf(), name, mode, self.config.roots.for_mode(mode));

        ensure_directories(ctx.paths.layout_dirs())?;
        let mut run_log = RunLog::open(&ctx.paths.logfile)?;
        run_log.info(format!("duty-transfer {} started in {} mode", DUTY_TRANSFER_VERSION, mode));
        run_log.info(format!("Processing {}", path.display()));
        run_log.info(format!("Logging to {}", ctx.paths.logfile.display()));

        match self.transfer(&mut ctx, &content, &mut run_log).await {
            Ok(()) => {}
            Err(e) if !e.is_manifest_scoped() => {
                run_log.error(format!("Processing aborted: {}", e));
                run_log.close()?;
                return Err(e);
            }
            Err(DutyError::PlanningError(e)) => {
                run_log.warn(e.to_string());
                ctx.disposition = Disposition::Skipped { reason: e.to_string() };
            }
            Err(e) => {
                run_log.error(format!("{} was not archived: {}", path.display(), e));
                ctx.disposition = Disposition::ArchiveFailed { reason: e.to_string() };
            }
        }
        run_log.close()?;

        Ok(ManifestReport { manifest: ctx.manifest_path, mode: ctx.mode, disposition: ctx.disposition })
    }

    async fn transfer(&self, ctx: &mut RunContext, content: &str, run_log: &mut RunLog) -> DutyResult<()> {
        let manifest = Manifest::from_csv_str(&ctx.manifest_path, content)?;
        run_log.info(format!("Loaded {} rows for project {}", manifest.rows.len(), ctx.project()));

        let plan = self.plan(&manifest, &ctx.name, &mut ctx.placeholders).await?;
        log_placeholders(&ctx.placeholders, run_log);

        for created in ensure_directories(plan.directories.iter().map(PathBuf::as_path))? {
            run_log.info(format!("The following directory was created: {}", created.display()));
        }

        let dispatcher = ChunkedDispatcher::new(self.client, &self.config.transfer);
        ctx.batches = dispatcher.prepare(&plan.job_list_string());
        run_log.info(format!("{} jobs split into {} batches", plan.job_count(), ctx.batches.len()));
        write_commands_file(&ctx.paths.commands_file, &dispatcher.command_lines(&ctx.batches))?;

        dispatcher.dispatch(ctx, run_log).await?;
        write_audit_log(&ctx.paths.audit_log, &ctx.audit_text)?;

        ArchiveTransition::new(&self.config.archive).finish(ctx, run_log)?;
        Ok(())
    }

    async fn plan(
        &self,
        manifest: &Manifest,
        name: &ManifestName,
        placeholders: &mut Placeholders,
    ) -> DutyResult<TransferPlan> {
        let mut resolver = PathResolver::new(self.prompt, placeholders);
        BatchPlanner::new(&self.config.destinations, &self.config.transfer.site_filter)
            .plan(manifest, name, &mut resolver)
            .await
    }

    /// Loads, resolves and chunks a manifest without touching the filesystem or running anything
    #[tracing::instrument(name = "manifest", skip_all, fields(manifest = %display_name(path)))]
    pub async fn preview(&self, path: &Path) -> DutyResult<ManifestPreview> {
        let content = read_manifest(path)?;
        let name = ManifestName::from_path(path)?;
        let mode: ScriptMode = self.config.mode.resolve(&content);
        let manifest = Manifest::from_csv_str(path, &content)?;

        let mut placeholders = Placeholders::default();
        let plan = self.plan(&manifest, &name, &mut placeholders).await?;

        let dispatcher = ChunkedDispatcher::new(self.client, &self.config.transfer);
        let batches = dispatcher.prepare(&plan.job_list_string());
        let command_lines = dispatcher.command_lines(&batches);
        Ok(ManifestPreview { name, mode, plan, batches, command_lines })
    }
}

fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    std::fs::read_to_string(path)
        .map_err(|source| ManifestError::Unreadable { path: path.display().to_string(), source })
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

fn log_placeholders(placeholders: &Placeholders, run_log: &mut RunLog) {
    if let Some(worksheets) = &placeholders.worksheets_dir {
        run_log.info(format!("Worksheets folder: {}", worksheets));
    }
    if let Some(runfolder) = &placeholders.runfolder_dir {
        run_log.info(format!("Run folder: {}", runfolder));
    }
}
