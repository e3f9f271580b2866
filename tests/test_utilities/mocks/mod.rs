/// Mock implementations for testing
mod mock_findings_publisher;
mod mock_inventory_scanner;
mod mock_progress_reporter;
mod mock_snapshot_provider;
mod mock_vulnerability_feed;

pub use mock_findings_publisher::MockFindingsPublisher;
pub use mock_inventory_scanner::MockInventoryScanner;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_snapshot_provider::MockSnapshotProvider;
pub use mock_vulnerability_feed::MockVulnerabilityFeed;
