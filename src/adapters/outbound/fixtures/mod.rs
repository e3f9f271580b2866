/// Fixture adapters - replay and record the vulnerability feed on disk
mod feed;

pub use feed::{FixtureVulnerabilityFeed, RecordingVulnerabilityFeed, KNOWN_VULNS_FILE};
