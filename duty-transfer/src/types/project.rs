use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::error::ManifestError;

static PROJECT_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"__([A-Za-z0-9]+)__").expect("valid regex"));
static RUN_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:NGS|TSO)\d+").expect("valid regex"));
static TSO_RUN_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"_(TSO\d+)\.csv$").expect("valid regex"));
static TSO_SEQUENCER_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"002(_\S+)_TSO\d+\.csv$").expect("valid regex"));

#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum ProjectType {
    /// Whole exome runs, every file goes to one destination
    #[strum(serialize = "WES")]
    Wes,
    /// SNP array runs, VCFs go to one destination
    #[strum(serialize = "SNP")]
    Snp,
    /// TSO500 runs, laid out under a per-run folder derived from the filename
    #[strum(serialize = "TSO500")]
    Tso500,
    /// MokaPipe runs, split between the primary worksheet folder and the secondary site
    #[strum(serialize = "MokaPipe")]
    MokaPipe,
}

/// Metadata carried by a manifest filename, e.g. `002_NGS501__MokaPipe__01.csv`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestName {
    pub file_name: String,
    pub stem: String,
    pub project: ProjectType,
    /// Run identifiers (`NGSnnn`, `TSOnnn`) found outside the project token, in order, deduplicated
    pub run_ids: Vec<String>,
}

impl ManifestName {
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ManifestError::MissingProjectToken { name: path.display().to_string() })?;
        Self::parse(&file_name)
    }

    pub fn parse(file_name: &str) -> Result<Self, ManifestError> {
        let captures = PROJECT_TOKEN
            .captures(file_name)
            .ok_or_else(|| ManifestError::MissingProjectToken { name: file_name.to_string() })?;
        let token = captures
            .get(0)
            .ok_or_else(|| ManifestError::MissingProjectToken { name: file_name.to_string() })?;
        let project_str = &captures[1];

        let project = ProjectType::from_str(project_str).map_err(|_| ManifestError::UnknownProject {
            name: file_name.to_string(),
            project: format!("{} (supported: {})", project_str, ProjectType::iter().join(", ")),
        })?;

        // The project token itself (e.g. TSO500) is not a run identifier
        let outside_token = format!("{}{}", &file_name[..token.start()], &file_name[token.end()..]);
        let run_ids = RUN_IDENTIFIER.find_iter(&outside_token).map(|m| m.as_str().to_string()).unique().collect();

        let stem = match file_name.rsplit_once('.') {
            Some((stem, _ext)) => stem.to_string(),
            None => file_name.to_string(),
        };

        Ok(Self { file_name: file_name.to_string(), stem, project, run_ids })
    }

    /// TSO500 results folder name: `<TSO run id><sequencer segment>`,
    /// e.g. `..._002_230415_A01229_0160_BHM3_TSO23014.csv` gives `TSO23014_230415_A01229_0160_BHM3`
    pub fn tso_run_folder(&self) -> Result<String, ManifestError> {
        let run_id = TSO_RUN_ID.captures(&self.file_name).map(|c| c[1].to_string()).ok_or_else(|| {
            ManifestError::MissingFilenameField { name: self.file_name.clone(), what: "TSO run identifier" }
        })?;
        let segment =
            TSO_SEQUENCER_SEGMENT.captures(&self.file_name).map(|c| c[1].to_string()).ok_or_else(|| {
                ManifestError::MissingFilenameField { name: self.file_name.clone(), what: "sequencer run segment" }
            })?;
        Ok(format!("{}{}", run_id, segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[rstest]
    #[case("run__WES__01.csv", ProjectType::Wes)]
    #[case("2023_01__SNP__batch.csv", ProjectType::Snp)]
    #[case("x__TSO500__002_230415_A01229_0160_BHM3_TSO23014.csv", ProjectType::Tso500)]
    #[case("002_NGS501__MokaPipe__01.csv", ProjectType::MokaPipe)]
    fn test_project_from_filename(#[case] name: &str, #[case] expected: ProjectType) {
        let parsed = ManifestName::parse(name).unwrap();
        assert_eq!(parsed.project, expected);
    }

    #[test]
    fn test_run_ids_exclude_project_token() {
        let parsed = ManifestName::parse("x__TSO500__002_230415_A01229_0160_BHM3_TSO23014.csv").unwrap();
        assert_eq!(parsed.run_ids, vec!["TSO23014".to_string()]);
        assert_eq!(parsed.stem, "x__TSO500__002_230415_A01229_0160_BHM3_TSO23014");
    }

    #[test]
    fn test_multiple_run_ids_are_reported_in_order() {
        let parsed = ManifestName::parse("002_NGS502_NGS501_NGS502__MokaPipe__.csv").unwrap();
        assert_eq!(parsed.run_ids, vec!["NGS502".to_string(), "NGS501".to_string()]);
    }

    #[test]
    fn test_missing_token() {
        assert_matches!(ManifestName::parse("run_WES_01.csv"), Err(ManifestError::MissingProjectToken { .. }));
    }

    #[test]
    fn test_unknown_project() {
        let err = ManifestName::parse("run__WGS__01.csv").unwrap_err();
        assert_matches!(err, ManifestError::UnknownProject { .. });
        assert!(err.to_string().contains("MokaPipe"));
    }

    #[test]
    fn test_tso_run_folder() {
        let parsed = ManifestName::parse("x__TSO500__002_230415_A01229_0160_BHM3_TSO23014.csv").unwrap();
        assert_eq!(parsed.tso_run_folder().unwrap(), "TSO23014_230415_A01229_0160_BHM3");

        let parsed = ManifestName::parse("run__TSO500__01.csv").unwrap();
        assert_matches!(parsed.tso_run_folder(), Err(ManifestError::MissingFilenameField { .. }));
    }
}
