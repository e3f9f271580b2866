use crate::adapters::outbound::network::{nodes_to_records, VulnerabilityNode};
use crate::inventory::domain::VulnerabilityRecord;
use crate::ports::outbound::VulnerabilityFeed;
use crate::shared::error::FeedError;
use crate::shared::security::read_regular_file;
use std::fs;
use std::path::PathBuf;

/// File holding the recorded feed inside a fixture directory
pub const KNOWN_VULNS_FILE: &str = "known_vulns.json";

/// FixtureVulnerabilityFeed adapter - reads a recorded feed
///
/// The file is a JSON array of feed nodes. The resource id is ignored: a
/// fixture directory belongs to one resource.
pub struct FixtureVulnerabilityFeed {
    fixture_dir: PathBuf,
}

impl FixtureVulnerabilityFeed {
    pub fn new(fixture_dir: PathBuf) -> Self {
        Self { fixture_dir }
    }
}

impl VulnerabilityFeed for FixtureVulnerabilityFeed {
    fn fetch_all(&self, _resource_id: &str) -> Result<Vec<VulnerabilityRecord>, FeedError> {
        let path = self.fixture_dir.join(KNOWN_VULNS_FILE);
        tracing::info!(fixture = %path.display(), "Reading vulnerability feed fixture");

        let fixture_error = |details: String| FeedError::Fixture {
            path: path.clone(),
            details,
        };
        let content = read_regular_file(&path, "feed fixture")
            .map_err(|e| fixture_error(format!("{:#}", e)))?;
        let nodes: Vec<VulnerabilityNode> =
            serde_json::from_str(&content).map_err(|e| fixture_error(e.to_string()))?;

        Ok(nodes_to_records(nodes))
    }
}

/// RecordingVulnerabilityFeed adapter - saves the complete feed it passes through
///
/// Only a fully assembled feed is written. A write failure is logged and the
/// records are still returned.
pub struct RecordingVulnerabilityFeed<F> {
    inner: F,
    record_dir: PathBuf,
}

impl<F: VulnerabilityFeed> RecordingVulnerabilityFeed<F> {
    pub fn new(inner: F, record_dir: PathBuf) -> Self {
        Self { inner, record_dir }
    }

    fn record(&self, records: &[VulnerabilityRecord]) -> crate::shared::Result<PathBuf> {
        fs::create_dir_all(&self.record_dir)?;
        let path = self.record_dir.join(KNOWN_VULNS_FILE);
        let nodes: Vec<VulnerabilityNode> = records.iter().map(Into::into).collect();
        fs::write(&path, serde_json::to_string_pretty(&nodes)?)?;
        Ok(path)
    }
}

impl<F: VulnerabilityFeed> VulnerabilityFeed for RecordingVulnerabilityFeed<F> {
    fn fetch_all(&self, resource_id: &str) -> Result<Vec<VulnerabilityRecord>, FeedError> {
        let records = self.inner.fetch_all(resource_id)?;
        match self.record(&records) {
            Ok(path) => tracing::info!(fixture = %path.display(), records = records.len(), "Recorded feed fixture"),
            Err(e) => tracing::warn!(error = %e, "Failed to record feed fixture"),
        }
        Ok(records)
    }
}
