use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rstest::*;
use tempfile::TempDir;

use crate::config::{DestinationsConfig, DutyConfig, RootsConfig, TransferConfig};
use crate::core::prompt::MockPrompt;
use crate::core::transfer::{MockTransferClient, TransferOutput};
use crate::types::constant::{RUNFOLDER_DIR_LABEL, WORKSHEETS_DIR_LABEL};
use crate::types::ModeSelection;

/// Temporary TEST and PROD roots plus a destination tree
pub struct TestRoot {
    pub dir: TempDir,
}

impl TestRoot {
    pub fn prod(&self) -> PathBuf {
        self.dir.path().join("prod")
    }

    pub fn test(&self) -> PathBuf {
        self.dir.path().join("test")
    }

    pub fn dest(&self, name: &str) -> PathBuf {
        self.dir.path().join("dest").join(name)
    }

    /// Creates `<worksheets>/<range>/<run>`, the folder a MokaPipe run writes into
    pub fn worksheet_run_folder(&self, range: &str, run: &str) -> PathBuf {
        let folder = self.dest("worksheets").join(range).join(run);
        std::fs::create_dir_all(&folder).unwrap();
        folder
    }

    pub fn write_manifest(&self, root: &Path, name: &str, content: &str) -> PathBuf {
        std::fs::create_dir_all(root).unwrap();
        let path = root.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn config(&self) -> DutyConfig {
        DutyConfig {
            mode: ModeSelection::Auto,
            roots: RootsConfig { test: self.test(), prod: self.prod() },
            destinations: DestinationsConfig {
                wes: Some(self.dest("WES")),
                snp: Some(self.dest("SNP")),
                tso500_results: Some(self.dest("TSO500")),
                tso500_folder_suffix: String::new(),
                mokapipe_worksheets: Some(self.dest("worksheets")),
                secondary_site_transfer: Some(self.dest("StG")),
            },
            transfer: TransferConfig::test_fast("transfer"),
            archive: Default::default(),
        }
    }

    /// Files directly under `dir`, by name
    pub fn file_names(&self, dir: &Path) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.path().is_file())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

#[fixture]
pub fn test_root() -> TestRoot {
    TestRoot { dir: TempDir::new().unwrap() }
}

/// Arguments the transfer client was invoked with, in order
pub type Invocations = Arc<Mutex<Vec<String>>>;

/// A transfer client answering every invocation with the next exit code of `codes`,
/// repeating the last one when the list runs out
pub fn scripted_client(codes: Vec<i32>) -> (MockTransferClient, Invocations) {
    let invocations: Invocations = Arc::default();
    let recorded = invocations.clone();
    let mut client = MockTransferClient::new();
    client.expect_command_line().returning(|arg| format!("transfer '{}'", arg));
    client.expect_invoke().returning(move |arg| {
        let mut calls = recorded.lock().unwrap();
        calls.push(arg.to_string());
        let code = codes.get(calls.len() - 1).or(codes.last()).copied().unwrap_or(0);
        Ok(TransferOutput::new(code, format!("transferred batch {}", calls.len())))
    });
    (client, invocations)
}

/// A prompt that must never be consulted
pub fn silent_prompt() -> MockPrompt {
    let mut prompt = MockPrompt::new();
    prompt.expect_ask().never();
    prompt
}

/// A prompt answering each placeholder exactly once
pub fn placeholder_prompt(worksheets: &'static str, runfolder: &'static str) -> MockPrompt {
    let mut prompt = MockPrompt::new();
    prompt.expect_ask().withf(|label| label == WORKSHEETS_DIR_LABEL).times(1).returning(move |_| Ok(worksheets.into()));
    prompt.expect_ask().withf(|label| label == RUNFOLDER_DIR_LABEL).times(1).returning(move |_| Ok(runfolder.into()));
    prompt
}
