use assert_matches::assert_matches;
use rstest::*;

use crate::config::ArchivePolicy;
use crate::tests::common::{scripted_client, silent_prompt, test_root, TestRoot};
use crate::types::Disposition;
use crate::worker::ManifestWorker;

#[rstest]
#[tokio::test]
async fn test_occupied_archive_target_fails_only_that_manifest(test_root: TestRoot) {
    let config = test_root.config();
    let archive = test_root.prod().join("archive");
    std::fs::create_dir_all(&archive).unwrap();
    std::fs::write(archive.join("run__WES__01.csv"), "archived earlier").unwrap();
    let first = test_root.write_manifest(&test_root.prod(), "run__WES__01.csv", "url\nhttp://a/1.zip\n");
    let second = test_root.write_manifest(&test_root.prod(), "run__WES__02.csv", "url\nhttp://b/2.zip\n");
    let (client, invocations) = scripted_client(vec![0]);
    let prompt = silent_prompt();

    let summary = ManifestWorker::new(&config, &prompt, &client).run(None).await.unwrap();

    assert_eq!(invocations.lock().unwrap().len(), 2);
    assert!(summary.has_archive_failures());
    assert_eq!(summary.archived(), 1);

    let failed = summary.reports.iter().find(|r| r.manifest == first).unwrap();
    assert_matches!(&failed.disposition, Disposition::ArchiveFailed { reason } if reason.contains("already exists"));
    assert!(first.is_file());
    assert_eq!(std::fs::read_to_string(archive.join("run__WES__01.csv")).unwrap(), "archived earlier");

    assert!(!second.exists());
    assert!(archive.join("run__WES__02.csv").is_file());
}

#[rstest]
#[tokio::test]
async fn test_stamped_policy_keeps_logfile_when_asked(test_root: TestRoot) {
    let mut config = test_root.config();
    config.archive.policy = ArchivePolicy::Stamped;
    config.archive.archive_logfile = false;
    let manifest = test_root.write_manifest(&test_root.prod(), "mail__SNP__01.csv", "url\nhttp://a/1.vcf\n");
    let (client, _) = scripted_client(vec![0]);
    let prompt = silent_prompt();

    ManifestWorker::new(&config, &prompt, &client).run(Some(&manifest)).await.unwrap();

    let archived = test_root.file_names(&test_root.prod().join("archive"));
    assert_eq!(archived.len(), 1);
    assert!(archived[0].starts_with("Processed_on_"));
    assert!(archived[0].ends_with("mail__SNP__01.csv"));

    let logs = test_root.file_names(&test_root.prod().join("process_logs"));
    assert!(logs.iter().any(|name| name.starts_with("mail__SNP__01.process_duty_")));
}
