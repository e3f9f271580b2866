/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces the pipeline uses to reach the snapshot
/// facility, the external scanner, the vulnerability feed, the publisher and
/// the console.
pub mod findings_publisher;
pub mod inventory_scanner;
pub mod progress_reporter;
pub mod snapshot_provider;
pub mod vulnerability_feed;

pub use findings_publisher::FindingsPublisher;
pub use inventory_scanner::InventoryScanner;
pub use progress_reporter::ProgressReporter;
pub use snapshot_provider::SnapshotProvider;
pub use vulnerability_feed::{FeedPage, FeedPageSource, VulnerabilityFeed};
