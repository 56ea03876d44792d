use std::path::PathBuf;

use itertools::Itertools;

use super::constant::JOB_DELIMITER;

/// Which transfer site a job list is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Site {
    Primary,
    Secondary,
}

/// One file to fetch: a source URL and the directory it lands in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    pub url: String,
    pub destination: PathBuf,
}

impl JobDescriptor {
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self { url: url.into(), destination: destination.into() }
    }

    /// `url,"destination"`, the form the transfer script splits on
    pub fn segment(&self) -> String {
        format!("{},\"{}\"", self.url, self.destination.display())
    }
}

/// Jobs planned for one category on one site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobList {
    pub category: String,
    pub site: Site,
    pub jobs: Vec<JobDescriptor>,
}

impl JobList {
    pub fn new(category: impl Into<String>, site: Site, jobs: Vec<JobDescriptor>) -> Self {
        Self { category: category.into(), site, jobs }
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }
}

/// Joins the segments of several job lists, in order, into one delimited job-list string
pub fn job_list_string<'a>(lists: impl IntoIterator<Item = &'a JobList>) -> String {
    lists.into_iter().flat_map(|list| list.jobs.iter()).map(JobDescriptor::segment).join(JOB_DELIMITER)
}
