use super::wire::parse_scan_output;
use crate::inventory::domain::{ScanResult, Snapshot, Volume};
use crate::ports::outbound::InventoryScanner;
use crate::shared::error::ScanError;
use crate::shared::security::read_regular_file;
use std::path::PathBuf;

/// File name of the canned scan result for a volume inside a fixture directory
pub fn scan_fixture_name(volume: &Volume) -> String {
    format!("scan-{}.json", volume.key())
}

/// FixtureInventoryScanner adapter - replays recorded scanner output
///
/// Reads `<fixture_dir>/scan-<volume-key>.json`, keyed by the snapshot's
/// origin volume. A missing fixture fails the volume like a scanner crash would.
pub struct FixtureInventoryScanner {
    fixture_dir: PathBuf,
}

impl FixtureInventoryScanner {
    pub fn new(fixture_dir: PathBuf) -> Self {
        Self { fixture_dir }
    }

    fn fixture_path(&self, volume: &Volume) -> PathBuf {
        self.fixture_dir.join(scan_fixture_name(volume))
    }
}

impl InventoryScanner for FixtureInventoryScanner {
    fn scan(&self, snapshot: &Snapshot) -> Result<ScanResult, ScanError> {
        let path = self.fixture_path(snapshot.origin());
        tracing::info!(fixture = %path.display(), "Reading scan fixture");

        let content = read_regular_file(&path, "scan fixture").map_err(|e| ScanError::Fixture {
            path: path.clone(),
            details: format!("{:#}", e),
        })?;

        parse_scan_output(content.as_bytes()).map_err(|source| ScanError::MalformedOutput {
            mount_path: snapshot.mount_path().to_path_buf(),
            source,
        })
    }
}
