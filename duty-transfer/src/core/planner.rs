use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::manifest::{Manifest, ManifestRow};
use super::resolver::{PathResolver, PAIR_TOKEN, SINGLE_TOKEN};
use crate::config::DestinationsConfig;
use crate::error::{DutyError, DutyResult, PlanningError};
use crate::types::{job::job_list_string, JobDescriptor, JobList, ManifestName, ProjectType, Site};

pub const RPKM: &str = "RPKM";
pub const COVERAGE: &str = "coverage";
pub const FH_PRS: &str = "FH_PRS";
pub const SOMPY: &str = "sompy";
pub const RESULTS: &str = "Results";
/// Category reported for rows planned from their own destination templates
pub const TEMPLATED: &str = "GSTT_dir";

/// Ordered job lists for one manifest plus every directory they need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub project: ProjectType,
    pub job_lists: Vec<JobList>,
    pub directories: BTreeSet<PathBuf>,
}

impl TransferPlan {
    pub fn new(project: ProjectType) -> Self {
        Self { project, job_lists: Vec::new(), directories: BTreeSet::new() }
    }

    /// Adds a job list; a non-empty one contributes its destinations to the directory plan
    pub fn push(&mut self, list: JobList) {
        debug!(category = %list.category, site = %list.site, jobs = list.len(), "Planned job list");
        self.directories.extend(list.jobs.iter().map(|job| job.destination.clone()));
        self.job_lists.push(list);
    }

    pub fn job_count(&self) -> usize {
        self.job_lists.iter().map(JobList::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.job_count() == 0
    }

    /// All segments of all lists, in plan order, joined with the job delimiter
    pub fn job_list_string(&self) -> String {
        job_list_string(&self.job_lists)
    }
}

/// Turns a loaded manifest into a [`TransferPlan`] following the layout of its project
pub struct BatchPlanner<'a> {
    destinations: &'a DestinationsConfig,
    site_filter: &'a str,
}

impl<'a> BatchPlanner<'a> {
    pub fn new(destinations: &'a DestinationsConfig, site_filter: &'a str) -> Self {
        Self { destinations, site_filter }
    }

    pub async fn plan(
        &self,
        manifest: &Manifest,
        name: &ManifestName,
        resolver: &mut PathResolver<'_>,
    ) -> DutyResult<TransferPlan> {
        if name.project == ProjectType::MokaPipe && name.run_ids.len() > 1 {
            return Err(PlanningError::MultipleRunIdentifiers {
                manifest: name.file_name.clone(),
                run_ids: name.run_ids.clone(),
            }
            .into());
        }

        if manifest.has_destination_column {
            return self.plan_templated(manifest, name.project, resolver).await;
        }

        match name.project {
            ProjectType::Wes => {
                let destination = DestinationsConfig::require(&self.destinations.wes, "wes")?;
                Ok(self.plan_single(manifest, name.project, destination))
            }
            ProjectType::Snp => {
                let destination = DestinationsConfig::require(&self.destinations.snp, "snp")?;
                Ok(self.plan_single(manifest, name.project, destination))
            }
            ProjectType::Tso500 => self.plan_tso500(manifest, name),
            ProjectType::MokaPipe => self.plan_mokapipe(manifest, resolver).await,
        }
    }

    fn site_of(&self, row: &ManifestRow) -> Site {
        if row.url.contains(self.site_filter) {
            Site::Secondary
        } else {
            Site::Primary
        }
    }

    /// Rows of `category` routed to `site` by the URL filter
    fn rows_at<'m>(
        &'m self,
        manifest: &'m Manifest,
        category: &'m str,
        site: Site,
    ) -> impl Iterator<Item = &'m ManifestRow> + 'm {
        manifest.rows_in_category(category).filter(move |row| self.site_of(row) == site)
    }

    fn plan_single(&self, manifest: &Manifest, project: ProjectType, destination: &Path) -> TransferPlan {
        let mut plan = TransferPlan::new(project);
        plan.push(JobList::new(project.to_string(), Site::Primary, jobs(manifest.rows.iter(), destination)));
        plan
    }

    fn plan_tso500(&self, manifest: &Manifest, name: &ManifestName) -> DutyResult<TransferPlan> {
        let results_root = DestinationsConfig::require(&self.destinations.tso500_results, "tso500_results")?;
        let run_folder = results_root
            .join(format!("{}{}", name.tso_run_folder()?, self.destinations.tso500_folder_suffix));

        manifest.require_category_column()?;

        let mut plan = TransferPlan::new(ProjectType::Tso500);
        plan.push(JobList::new(
            COVERAGE,
            Site::Primary,
            jobs(manifest.rows_in_category(COVERAGE), &run_folder.join(COVERAGE)),
        ));
        plan.push(JobList::new(SOMPY, Site::Primary, jobs(manifest.rows_in_category(SOMPY), &run_folder)));
        plan.push(JobList::new(RESULTS, Site::Primary, jobs(manifest.rows_in_category(RESULTS), &run_folder)));
        Ok(plan)
    }

    async fn plan_mokapipe(&self, manifest: &Manifest, resolver: &mut PathResolver<'_>) -> DutyResult<TransferPlan> {
        let worksheets = DestinationsConfig::require(&self.destinations.mokapipe_worksheets, "mokapipe_worksheets")?;
        let secondary =
            DestinationsConfig::require(&self.destinations.secondary_site_transfer, "secondary_site_transfer")?;

        manifest.require_category_column()?;

        let mut plan = TransferPlan::new(ProjectType::MokaPipe);
        let has_rows = [RPKM, COVERAGE, FH_PRS].into_iter().any(|c| manifest.rows_in_category(c).next().is_some());
        if !has_rows {
            info!("No MokaPipe rows to transfer, destinations left unresolved");
            for site in [Site::Primary, Site::Secondary] {
                for category in [RPKM, COVERAGE, FH_PRS] {
                    plan.push(JobList::new(category, site, Vec::new()));
                }
            }
            return Ok(plan);
        }

        // The worksheet run folder must already exist; only its category subfolders are created
        let template = format!("{}/{}", worksheets.display().to_string().trim_end_matches(['/', '\\']), PAIR_TOKEN);
        let output_dir = resolver.resolve_existing_dir(&template).await?;
        let secondary_dir = secondary.join(resolver.runfolder_dir().await?);
        info!(output = %output_dir.display(), secondary = %secondary_dir.display(), "Resolved MokaPipe destinations");

        plan.push(JobList::new(RPKM, Site::Primary, jobs(manifest.rows_in_category(RPKM), &output_dir.join(RPKM))));
        for category in [COVERAGE, FH_PRS] {
            let rows = self.rows_at(manifest, category, Site::Primary);
            plan.push(JobList::new(category, Site::Primary, jobs(rows, &output_dir.join(category))));
        }
        // The secondary site receives every RPKM file
        plan.push(JobList::new(
            RPKM,
            Site::Secondary,
            jobs(manifest.rows_in_category(RPKM), &secondary_dir.join(RPKM)),
        ));
        for category in [COVERAGE, FH_PRS] {
            let rows = self.rows_at(manifest, category, Site::Secondary);
            plan.push(JobList::new(category, Site::Secondary, jobs(rows, &secondary_dir.join(category))));
        }
        Ok(plan)
    }

    async fn plan_templated(
        &self,
        manifest: &Manifest,
        project: ProjectType,
        resolver: &mut PathResolver<'_>,
    ) -> DutyResult<TransferPlan> {
        let mut planned = Vec::new();
        for row in &manifest.rows {
            for template in &row.destination_templates {
                let mut destination = resolver.resolve(template).await?;
                if let Some(subdir) = row.subdir.as_deref() {
                    destination.push_str(subdir);
                }
                if destination.contains(SINGLE_TOKEN) {
                    return Err(PlanningError::UnresolvedPlaceholder { destination }.into());
                }
                planned.push(JobDescriptor::new(row.url.clone(), destination));
            }
        }

        let mut plan = TransferPlan::new(project);
        plan.push(JobList::new(TEMPLATED, Site::Primary, planned));
        Ok(plan)
    }
}

fn jobs<'r>(rows: impl Iterator<Item = &'r ManifestRow>, destination: &Path) -> Vec<JobDescriptor> {
    rows.map(|row| JobDescriptor::new(row.url.clone(), destination)).collect()
}

/// Creates every missing directory in `directories`. Existing ones are left alone.
/// Returns the directories that were created.
pub fn ensure_directories<'p>(directories: impl IntoIterator<Item = &'p Path>) -> DutyResult<Vec<PathBuf>> {
    let mut created = Vec::new();
    for dir in directories {
        if dir.is_dir() {
            continue;
        }
        std::fs::create_dir_all(dir)
            .map_err(|source| DutyError::DirectoryError { path: dir.display().to_string(), source })?;
        info!("The following directory was created: {}", dir.display());
        created.push(dir.to_path_buf());
    }
    Ok(created)
}
