use assert_matches::assert_matches;
use rstest::*;
use tracing_test::traced_test;

use crate::core::transfer::MockTransferClient;
use crate::error::{DutyError, TransferError};
use crate::tests::common::{scripted_client, silent_prompt, test_root, TestRoot};
use crate::types::constant::DUTY_TRANSFER_VERSION;
use crate::types::Disposition;
use crate::worker::ManifestWorker;

#[rstest]
#[tokio::test]
async fn test_wes_manifest_is_transferred_and_archived(test_root: TestRoot) {
    let config = test_root.config();
    let manifest =
        test_root.write_manifest(&test_root.prod(), "run__WES__01.csv", "url\nhttp://a/1.zip\nhttp://b/2\n");
    let (client, invocations) = scripted_client(vec![0]);
    let prompt = silent_prompt();

    let summary = ManifestWorker::new(&config, &prompt, &client).run(Some(&manifest)).await.unwrap();

    let dest = test_root.dest("WES");
    assert_eq!(
        *invocations.lock().unwrap(),
        vec![format!("http://a/1.zip,\"{0}\" http://b/2,\"{0}\"", dest.display())]
    );
    assert!(dest.is_dir());

    let archive = test_root.prod().join("archive");
    assert_eq!(
        summary.reports[0].disposition,
        Disposition::Archived { archived_to: archive.join("run__WES__01.csv") }
    );
    assert!(!manifest.exists());
    assert!(!summary.has_archive_failures());

    let archived = test_root.file_names(&archive);
    assert_eq!(archived.len(), 2);
    assert!(archived.iter().any(|name| name.starts_with("run__WES__01.process_duty_")));

    let logs = test_root.file_names(&test_root.prod().join("process_logs"));
    let audit = logs.iter().find(|name| name.starts_with("Finished_on_")).expect("audit log written");
    let audit_text = std::fs::read_to_string(test_root.prod().join("process_logs").join(audit)).unwrap();
    assert_eq!(audit_text, format!("Version {}\ntransferred batch 1\n", DUTY_TRANSFER_VERSION));

    let cmds = test_root.file_names(&test_root.prod().join("cmds_logs"));
    assert_eq!(cmds.len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_long_job_list_is_sent_in_three_batches(test_root: TestRoot) {
    let mut config = test_root.config();
    config.destinations.wes = Some("/d".into());
    // 200 segments of 82 characters joined by the 3 character delimiter: 16,997 characters
    let url_len = 82 - ",\"/d\"".len();
    let rows: String = (0..200).map(|i| format!("{:0width$}\n", i, width = url_len)).collect();
    let manifest = test_root.write_manifest(&test_root.prod(), "run__WES__02.csv", &format!("url\n{}", rows));
    let (client, invocations) = scripted_client(vec![0]);
    let prompt = silent_prompt();

    ManifestWorker::new(&config, &prompt, &client).run(Some(&manifest)).await.unwrap();

    let invocations = invocations.lock().unwrap();
    assert_eq!(invocations.len(), 3);
    let segments: Vec<usize> = invocations.iter().map(|arg| arg.split(' ').count()).collect();
    assert_eq!(segments, vec![67, 67, 66]);
    assert!(invocations[0].starts_with(&format!("{:0width$},", 0, width = url_len)));
    assert!(invocations[2].ends_with(&format!("{:0width$},\"/d\"", 199, width = url_len)));
}

#[rstest]
#[tokio::test]
async fn test_failing_command_is_attempted_five_times_then_aborts(test_root: TestRoot) {
    let config = test_root.config();
    let manifest = test_root.write_manifest(&test_root.prod(), "run__SNP__01.csv", "url\nhttp://a/1.vcf\n");
    let (client, invocations) = scripted_client(vec![1]);
    let prompt = silent_prompt();

    let result = ManifestWorker::new(&config, &prompt, &client).run(Some(&manifest)).await;

    assert_matches!(result, Err(DutyError::TransferError(TransferError::RetriesExhausted { attempts: 5, .. })));
    assert_eq!(invocations.lock().unwrap().len(), 5);
    assert!(manifest.is_file());
    assert!(test_root.file_names(&test_root.prod().join("archive")).is_empty());

    let logs = test_root.file_names(&test_root.prod().join("process_logs"));
    let log_name = logs.iter().find(|name| name.contains(".process_duty_")).unwrap();
    let log = std::fs::read_to_string(test_root.prod().join("process_logs").join(log_name)).unwrap();
    let announced: Vec<&str> = log.lines().filter_map(|line| line.split("Trying again. Attempt ").nth(1)).collect();
    assert_eq!(announced, vec!["2", "3", "4", "5"]);
}

#[rstest]
#[tokio::test]
async fn test_empty_manifest_never_invokes_and_is_archived(test_root: TestRoot) {
    let config = test_root.config();
    let manifest = test_root.write_manifest(&test_root.prod(), "run__WES__03.csv", "url\n");
    let mut client = MockTransferClient::new();
    client.expect_invoke().never();
    client.expect_command_line().never();
    let prompt = silent_prompt();

    let summary = ManifestWorker::new(&config, &prompt, &client).run(Some(&manifest)).await.unwrap();

    assert!(!test_root.dest("WES").exists());
    assert_matches!(summary.reports[0].disposition, Disposition::Archived { .. });
}

#[rstest]
#[tokio::test]
async fn test_invocation_error_leaves_manifest_in_place(test_root: TestRoot) {
    let config = test_root.config();
    let manifest = test_root.write_manifest(&test_root.prod(), "run__WES__04.csv", "url\nhttp://a/1.zip\n");
    let mut client = MockTransferClient::new();
    client.expect_command_line().returning(|arg| format!("transfer '{}'", arg));
    client.expect_invoke().times(1).returning(|_| {
        Err(TransferError::Invocation {
            program: "transfer".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        })
    });
    let prompt = silent_prompt();

    let summary = ManifestWorker::new(&config, &prompt, &client).run(Some(&manifest)).await.unwrap();

    assert!(manifest.is_file());
    assert_matches!(&summary.reports[0].disposition, Disposition::PartialFailure { failed } if failed.len() == 1);
    assert!(!summary.has_archive_failures());
}

#[rstest]
#[traced_test]
#[tokio::test]
async fn test_fatal_error_still_reports_manifests_already_archived(test_root: TestRoot) {
    let config = test_root.config();
    let wes = test_root.write_manifest(&test_root.prod(), "run__WES__01.csv", "url\nhttp://a/1.zip\n");
    let snp = test_root.write_manifest(&test_root.prod(), "run__SNP__01.csv", "url\nhttp://a/1.vcf\n");
    let (client, invocations) = scripted_client(vec![0, 1]);
    let prompt = silent_prompt();

    let result = ManifestWorker::new(&config, &prompt, &client).run(None).await;

    assert_matches!(result, Err(DutyError::TransferError(TransferError::RetriesExhausted { .. })));
    assert_eq!(invocations.lock().unwrap().len(), 6);
    assert!(!wes.exists());
    assert!(snp.is_file());
    assert!(logs_contain("Run finished"));
    assert!(logs_contain("Archived"));
}
