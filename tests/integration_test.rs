/// Integration tests for the application layer
mod test_utilities;

use hostvuln::inventory::services::SeparatorStyle;
use hostvuln::prelude::*;
use test_utilities::mocks::*;
use uuid::Uuid;

fn volume(root: &str) -> Volume {
    Volume::new(root).unwrap()
}

fn windows_request(roots: &[&str]) -> ScanRequest {
    ScanRequest::new(
        roots.iter().map(|root| volume(root)).collect(),
        "resource-1",
        "subscription-1",
        AssetIdentifier::new("Azure", "/subscriptions/s/vm-1"),
        DEFAULT_INTEGRATION_ID.parse::<Uuid>().unwrap(),
    )
    .with_separator_style(SeparatorStyle::Backslash)
}

fn libfoo_scan() -> ScanResult {
    ScanResult::new(
        vec![Library::new("Program Files\\foo\\libfoo.dll", "libfoo", "1.2")],
        vec![],
    )
}

fn cve_1() -> VulnerabilityRecord {
    VulnerabilityRecord::new("CVE-1", "libfoo", "1.2", Severity::High).with_fixed_version("1.3")
}

#[test]
fn test_failed_snapshot_skips_only_that_volume() {
    let snapshots = MockSnapshotProvider::new().failing_on("D:\\");
    let scanner = MockInventoryScanner::new()
        .with_result("C:\\", libfoo_scan())
        .with_result("E:\\", libfoo_scan());
    let progress = MockProgressReporter::new();

    let use_case = ScanVolumesUseCase::new(snapshots.clone(), scanner.clone(), progress.clone());
    let report = use_case.execute(
        &[volume("C:\\"), volume("D:\\"), volume("E:\\")],
        &PathNormalizer::new(SeparatorStyle::Backslash),
    );

    assert_eq!(report.scanned, vec![volume("C:\\"), volume("E:\\")]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].volume, volume("D:\\"));
    assert_eq!(report.inventory.len(), 2);

    // The scanner never sees the failed volume
    assert_eq!(scanner.scanned(), vec!["C:\\", "E:\\"]);
    assert_eq!(progress.errors().len(), 1);
    assert!(progress.errors()[0].contains("D:\\"));
}

#[test]
fn test_every_acquired_snapshot_is_released_even_when_scan_fails() {
    let snapshots = MockSnapshotProvider::new();
    let scanner = MockInventoryScanner::new()
        .with_result("C:\\", libfoo_scan())
        .failing_on("D:\\");

    let use_case =
        ScanVolumesUseCase::new(snapshots.clone(), scanner, MockProgressReporter::new());
    let report = use_case.execute(
        &[volume("C:\\"), volume("D:\\")],
        &PathNormalizer::new(SeparatorStyle::Backslash),
    );

    assert_eq!(report.scanned, vec![volume("C:\\")]);
    assert_eq!(
        snapshots.events(),
        vec!["acquire C:\\", "release C:\\", "acquire D:\\", "release D:\\"]
    );
}

#[test]
fn test_partial_mount_is_discarded_after_failed_acquire() {
    let snapshots = MockSnapshotProvider::new()
        .failing_on("D:\\")
        .leaving_partial();

    let use_case = ScanVolumesUseCase::new(
        snapshots.clone(),
        MockInventoryScanner::new(),
        MockProgressReporter::new(),
    );
    use_case.execute(&[volume("D:\\")], &PathNormalizer::new(SeparatorStyle::Backslash));

    let events = snapshots.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], "acquire-failed D:\\");
    assert!(events[1].starts_with("discard "));
    assert!(events[1].contains("partial-D"));
}

#[test]
fn test_library_paths_are_rooted_with_a_single_separator() {
    let scanner = MockInventoryScanner::new().with_result(
        "C:\\",
        ScanResult::new(
            vec![
                Library::new("\\Windows\\a.dll", "a", "1"),
                Library::new("Program Files/b/b.dll", "b", "1"),
            ],
            vec![Application::new("Editor", "2.0")],
        ),
    );

    let use_case = ScanVolumesUseCase::new(
        MockSnapshotProvider::new(),
        scanner,
        MockProgressReporter::new(),
    );
    let report = use_case.execute(
        &[volume("C:\\")],
        &PathNormalizer::new(SeparatorStyle::Backslash),
    );

    let paths: Vec<&str> = report
        .inventory
        .libraries()
        .map(|lib| lib.path.as_str())
        .collect();
    assert_eq!(paths, vec!["C:\\Windows\\a.dll", "C:\\Program Files\\b\\b.dll"]);
    assert_eq!(report.inventory.applications().count(), 1);
}

#[test]
fn test_reconciliation_matches_name_and_version_only() {
    let inventory: AggregatedInventory = vec![
        InventoryItem::from(Library::new("C:\\x\\libfoo.dll", "libfoo", "1.2")),
        InventoryItem::from(Library::new("C:\\y\\libbar.dll", "libbar", "2.0")),
        InventoryItem::from(Application::new("Editor", "5.1")),
    ]
    .into_iter()
    .collect();
    let feed = vec![
        VulnerabilityRecord::new("CVE-1", "libfoo", "1.2", Severity::High),
        VulnerabilityRecord::new("CVE-2", "libfoo", "1.3", Severity::Low),
        VulnerabilityRecord::new("CVE-3", "Editor", "5.1", Severity::Critical),
        VulnerabilityRecord::new("CVE-4", "libbaz", "2.0", Severity::Medium),
    ];

    let asset = ReconciliationEngine::new(VersionMatching::Exact)
        .reconcile(&inventory, &feed)
        .unwrap();

    let ids: Vec<&str> = asset
        .findings()
        .iter()
        .map(|f| f.record().id.as_str())
        .collect();
    assert_eq!(ids, vec!["CVE-1", "CVE-3"]);
}

#[test]
fn test_run_publishes_single_finding_from_surviving_volume() {
    let feed = MockVulnerabilityFeed::new(vec![cve_1()]);
    let publisher = MockFindingsPublisher::new();
    let use_case = RunScanUseCase::new(
        MockSnapshotProvider::new().failing_on("D:\\"),
        MockInventoryScanner::new()
            .with_result("C:\\", libfoo_scan())
            .with_result("D:\\", libfoo_scan()),
        feed.clone(),
        publisher.clone(),
        MockProgressReporter::new(),
    );

    let outcome = use_case.execute(windows_request(&["C:\\", "D:\\"])).unwrap();

    assert_eq!(outcome.findings, 1);
    assert!(outcome.published);
    assert_eq!(outcome.skipped_volumes.len(), 1);
    assert_eq!(feed.requested(), vec!["resource-1"]);

    let payload = publisher.payload(0);
    assert_eq!(payload.data_sources.len(), 1);
    assert_eq!(payload.data_sources[0].id, "subscription-1");
    let asset = &payload.data_sources[0].assets[0];
    assert_eq!(asset.asset_identifier.cloud_platform, "Azure");
    assert_eq!(asset.vulnerability_findings.len(), 1);

    let finding = &asset.vulnerability_findings[0];
    assert_eq!(finding.name, "CVE-1");
    assert_eq!(finding.detailed_name, "libfoo");
    assert_eq!(finding.path.as_deref(), Some("C:\\Program Files\\foo\\libfoo.dll"));
    assert_eq!(finding.remediation.as_deref(), Some("Upgrade to version 1.3"));
}

#[test]
fn test_run_without_findings_publishes_nothing() {
    let publisher = MockFindingsPublisher::new();
    let use_case = RunScanUseCase::new(
        MockSnapshotProvider::new(),
        MockInventoryScanner::new().with_result("C:\\", libfoo_scan()),
        MockVulnerabilityFeed::new(vec![VulnerabilityRecord::new(
            "CVE-9",
            "libfoo",
            "9.9",
            Severity::Low,
        )]),
        publisher.clone(),
        MockProgressReporter::new(),
    );

    let outcome = use_case.execute(windows_request(&["C:\\"])).unwrap();

    assert_eq!(outcome.findings, 0);
    assert!(!outcome.published);
    assert!(publisher.published().is_empty());
    assert!(outcome.to_string().ends_with("nothing published"));
}

#[test]
fn test_feed_failure_aborts_before_any_volume_is_touched() {
    let snapshots = MockSnapshotProvider::new();
    let publisher = MockFindingsPublisher::new();
    let use_case = RunScanUseCase::new(
        snapshots.clone(),
        MockInventoryScanner::new().with_result("C:\\", libfoo_scan()),
        MockVulnerabilityFeed::failing(),
        publisher.clone(),
        MockProgressReporter::new(),
    );

    let err = use_case.execute(windows_request(&["C:\\"])).unwrap_err();

    assert!(err.to_string().contains("resource-1"));
    assert!(format!("{:#}", err).contains("503"));
    assert!(snapshots.events().is_empty());
    assert!(publisher.published().is_empty());
}

#[test]
fn test_staged_payload_is_removed_after_successful_publish() {
    let publisher = MockFindingsPublisher::new();
    let use_case = RunScanUseCase::new(
        MockSnapshotProvider::new(),
        MockInventoryScanner::new().with_result("C:\\", libfoo_scan()),
        MockVulnerabilityFeed::new(vec![cve_1()]),
        publisher.clone(),
        MockProgressReporter::new(),
    );

    use_case.execute(windows_request(&["C:\\"])).unwrap();

    let published = publisher.published();
    assert_eq!(published.len(), 1);
    assert!(!published[0].path.exists());
    assert!(published[0].contents.contains("integrationId"));
}

#[test]
fn test_staged_payload_is_removed_after_failed_publish() {
    let publisher = MockFindingsPublisher::failing();
    let use_case = RunScanUseCase::new(
        MockSnapshotProvider::new(),
        MockInventoryScanner::new().with_result("C:\\", libfoo_scan()),
        MockVulnerabilityFeed::new(vec![cve_1()]),
        publisher.clone(),
        MockProgressReporter::new(),
    );

    let err = use_case.execute(windows_request(&["C:\\"])).unwrap_err();

    assert!(format!("{:#}", err).contains("Upload rejected"));
    let published = publisher.published();
    assert_eq!(published.len(), 1);
    assert!(!published[0].path.exists());
}

#[test]
fn test_payload_survives_serialization_unchanged() {
    let publisher = MockFindingsPublisher::new();
    let use_case = RunScanUseCase::new(
        MockSnapshotProvider::new(),
        MockInventoryScanner::new().with_result("C:\\", libfoo_scan()),
        MockVulnerabilityFeed::new(vec![cve_1().with_description("heap overflow")]),
        publisher.clone(),
        MockProgressReporter::new(),
    );

    use_case.execute(windows_request(&["C:\\"])).unwrap();

    let payload = publisher.payload(0);
    let reparsed: UploadPayload = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
    assert_eq!(reparsed, payload);
    assert_eq!(reparsed.finding_count(), 1);
}

#[test]
fn test_progress_is_reported_per_volume() {
    let progress = MockProgressReporter::new();
    let use_case = RunScanUseCase::new(
        MockSnapshotProvider::new(),
        MockInventoryScanner::new(),
        MockVulnerabilityFeed::new(vec![]),
        MockFindingsPublisher::new(),
        progress.clone(),
    );

    use_case.execute(windows_request(&["C:\\", "D:\\"])).unwrap();

    let messages = progress.get_messages();
    assert!(messages.iter().any(|m| m.starts_with("Progress: 0/2 - C:\\")));
    assert!(messages.iter().any(|m| m.starts_with("Progress: 1/2 - D:\\")));
    assert!(messages.iter().any(|m| m.starts_with("Completed: ")));
}
