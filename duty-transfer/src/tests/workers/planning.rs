use assert_matches::assert_matches;
use rstest::*;
use tracing_test::traced_test;

use crate::core::prompt::MockPrompt;
use crate::core::transfer::MockTransferClient;
use crate::error::{DutyError, ManifestError, PromptError};
use crate::tests::common::{placeholder_prompt, scripted_client, silent_prompt, test_root, TestRoot};
use crate::types::constant::{RUNFOLDER_DIR_LABEL, WORKSHEETS_DIR_LABEL};
use crate::types::{Disposition, ModeSelection, ScriptMode};
use crate::worker::ManifestWorker;

const MOKAPIPE_ROWS: &str = "url,type\n\
    http://gstt/a.RPKM,RPKM\n\
    http://gstt/a.coverage,coverage\n\
    http://StG/b.coverage,coverage\n\
    http://gstt/a.prs,FH_PRS\n";

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_mokapipe_conflict_is_skipped_and_next_manifest_runs(test_root: TestRoot) {
    let config = test_root.config();
    test_root.write_manifest(&test_root.prod(), "002_NGS501_NGS502__MokaPipe__01.csv", MOKAPIPE_ROWS);
    test_root.write_manifest(&test_root.prod(), "run__WES__01.csv", "url\nhttp://a/1.zip\n");
    let (client, invocations) = scripted_client(vec![0]);
    let prompt = silent_prompt();

    let summary = ManifestWorker::new(&config, &prompt, &client).run(None).await.unwrap();

    assert_eq!(summary.reports.len(), 2);
    let moka = summary.reports.iter().find(|r| r.manifest.to_string_lossy().contains("MokaPipe")).unwrap();
    assert_matches!(&moka.disposition, Disposition::Skipped { reason } if reason.contains("NGS501, NGS502"));
    assert!(moka.manifest.is_file());
    assert!(!test_root.dest("worksheets").exists());
    assert!(!test_root.dest("StG").exists());
    assert!(logs_contain("Split the manifest so that each file covers a single run"));

    assert_eq!(summary.archived(), 1);
    assert_eq!(invocations.lock().unwrap().len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_mokapipe_prompts_once_per_value(test_root: TestRoot) {
    let config = test_root.config();
    let manifest = test_root.write_manifest(&test_root.prod(), "002_NGS501__MokaPipe__01.csv", MOKAPIPE_ROWS);
    let out = test_root.worksheet_run_folder("NGS_501 to 600", "NGS501");
    let (client, invocations) = scripted_client(vec![0]);
    let prompt = placeholder_prompt("NGS_501 to 600", "NGS501");

    let summary = ManifestWorker::new(&config, &prompt, &client).run(Some(&manifest)).await.unwrap();

    let stg = test_root.dest("StG").join("NGS501");
    for dir in [out.join("RPKM"), out.join("coverage"), out.join("FH_PRS"), stg.join("RPKM"), stg.join("coverage")] {
        assert!(dir.is_dir(), "{} should exist", dir.display());
    }
    // No secondary-site FH_PRS rows, so no folder for them
    assert!(!stg.join("FH_PRS").exists());

    let invocations = invocations.lock().unwrap();
    assert_eq!(invocations.len(), 1);
    // Destinations contain spaces, so count the jobs by their URLs
    assert_eq!(invocations[0].matches("http://").count(), 5);
    assert_matches!(summary.reports[0].disposition, Disposition::Archived { .. });
}

#[rstest]
#[tokio::test]
async fn test_cancelled_prompt_aborts_run(test_root: TestRoot) {
    let config = test_root.config();
    let manifest = test_root.write_manifest(&test_root.prod(), "002_NGS501__MokaPipe__01.csv", MOKAPIPE_ROWS);
    let mut client = MockTransferClient::new();
    client.expect_invoke().never();
    let mut prompt = MockPrompt::new();
    prompt.expect_ask().times(1).returning(|label| Err(PromptError::Cancelled { label: label.to_string() }));

    let result = ManifestWorker::new(&config, &prompt, &client).run(Some(&manifest)).await;

    assert_matches!(result, Err(DutyError::PromptError(PromptError::Cancelled { .. })));
    assert!(manifest.is_file());
}

#[rstest]
#[tokio::test]
async fn test_testing_sentinel_selects_test_root(test_root: TestRoot) {
    let config = test_root.config();
    let manifest =
        test_root.write_manifest(&test_root.prod(), "run__WES__01.csv", "url\nhttp://dl/testing/1.zip\n");
    let (client, _) = scripted_client(vec![0]);
    let prompt = silent_prompt();

    let summary = ManifestWorker::new(&config, &prompt, &client).run(Some(&manifest)).await.unwrap();

    assert_eq!(summary.reports[0].mode, ScriptMode::Test);
    let archived = test_root.file_names(&test_root.test().join("archive"));
    assert!(archived.contains(&"run__WES__01.csv".to_string()));
    assert!(!test_root.prod().join("archive").exists());
}

#[rstest]
#[tokio::test]
async fn test_preview_has_no_side_effects(test_root: TestRoot) {
    let mut config = test_root.config();
    config.mode = ModeSelection::Prod;
    let manifest = test_root.write_manifest(&test_root.prod(), "002_NGS501__MokaPipe__01.csv", MOKAPIPE_ROWS);
    let out = test_root.worksheet_run_folder("NGS_501 to 600", "NGS501");
    let mut client = MockTransferClient::new();
    client.expect_invoke().never();
    client.expect_command_line().returning(|arg| format!("transfer '{}'", arg));
    let prompt = placeholder_prompt("NGS_501 to 600", "NGS501");

    let preview = ManifestWorker::new(&config, &prompt, &client).preview(&manifest).await.unwrap();

    assert_eq!(preview.plan.job_count(), 5);
    assert_eq!(preview.batches.len(), 1);
    assert_eq!(preview.command_lines.len(), 1);
    assert!(preview.command_lines[0].starts_with("transfer 'http://gstt/a.RPKM,"));
    assert!(!out.join("RPKM").exists());
    assert!(!test_root.dest("StG").exists());
    assert!(!test_root.prod().join("process_logs").exists());
    assert!(manifest.is_file());
}

#[rstest]
#[tokio::test]
async fn test_no_manifest_is_fatal(test_root: TestRoot) {
    let config = test_root.config();
    std::fs::create_dir_all(test_root.prod()).unwrap();
    let client = MockTransferClient::new();
    let prompt = silent_prompt();

    let result = ManifestWorker::new(&config, &prompt, &client).run(None).await;
    assert_matches!(result, Err(DutyError::NoManifest(_)));
}

#[rstest]
#[tokio::test]
async fn test_mistyped_run_folder_is_asked_again_and_never_created(test_root: TestRoot) {
    let config = test_root.config();
    let manifest = test_root.write_manifest(&test_root.prod(), "002_NGS501__MokaPipe__01.csv", MOKAPIPE_ROWS);
    let out = test_root.worksheet_run_folder("NGS_501 to 600", "NGS501");
    let (client, _) = scripted_client(vec![0]);
    let mut prompt = MockPrompt::new();
    prompt.expect_ask().withf(|label| label == WORKSHEETS_DIR_LABEL).times(2).returning(|_| Ok("NGS_501 to 600".into()));
    let mut runfolders = vec!["NGS501".to_string(), "NGS5O1".to_string()];
    prompt
        .expect_ask()
        .withf(|label| label == RUNFOLDER_DIR_LABEL)
        .times(2)
        .returning(move |_| Ok(runfolders.pop().unwrap_or_default()));

    let summary = ManifestWorker::new(&config, &prompt, &client).run(Some(&manifest)).await.unwrap();

    assert_matches!(summary.reports[0].disposition, Disposition::Archived { .. });
    assert!(out.join("RPKM").is_dir());
    assert!(!test_root.dest("worksheets").join("NGS_501 to 600").join("NGS5O1").exists());
    assert!(!test_root.dest("StG").join("NGS5O1").exists());
}

#[rstest]
#[tokio::test]
async fn test_mokapipe_without_transferable_rows_never_prompts(test_root: TestRoot) {
    let config = test_root.config();
    let manifest = test_root.write_manifest(&test_root.prod(), "002_NGS501__MokaPipe__01.csv", "url,type\n");
    let mut client = MockTransferClient::new();
    client.expect_invoke().never();
    let prompt = silent_prompt();

    let summary = ManifestWorker::new(&config, &prompt, &client).run(Some(&manifest)).await.unwrap();

    assert_matches!(summary.reports[0].disposition, Disposition::Archived { .. });
    assert!(!test_root.dest("worksheets").exists());
}

#[rstest]
#[case::tso500("x__TSO500__002_230415_A01229_0160_BHM3_TSO23014.csv")]
#[case::mokapipe("002_NGS501__MokaPipe__01.csv")]
#[tokio::test]
async fn test_manifest_without_category_column_is_not_archived(test_root: TestRoot, #[case] file_name: &str) {
    let config = test_root.config();
    let manifest = test_root.write_manifest(&test_root.prod(), file_name, "url\nhttp://a/cov.zip\nhttp://a/res.zip\n");
    let mut client = MockTransferClient::new();
    client.expect_invoke().never();
    let prompt = silent_prompt();

    let result = ManifestWorker::new(&config, &prompt, &client).run(Some(&manifest)).await;

    assert_matches!(result, Err(DutyError::ManifestError(ManifestError::MissingColumn { .. })));
    assert!(manifest.is_file());
    assert!(test_root.file_names(&test_root.prod().join("archive")).is_empty());
}

#[rstest]
#[tokio::test]
async fn test_templated_row_without_destination_is_not_archived(test_root: TestRoot) {
    let config = test_root.config();
    let dest = test_root.dest("WES");
    let content = format!("url,GSTT_dir\nhttp://a/1.zip,{}\nhttp://a/2.zip,\n", dest.display());
    let manifest = test_root.write_manifest(&test_root.prod(), "run__WES__05.csv", &content);
    let mut client = MockTransferClient::new();
    client.expect_invoke().never();
    let prompt = silent_prompt();

    let result = ManifestWorker::new(&config, &prompt, &client).run(Some(&manifest)).await;

    assert_matches!(
        result,
        Err(DutyError::ManifestError(ManifestError::MalformedDestinationList { row: 2, .. }))
    );
    assert!(manifest.is_file());
}
