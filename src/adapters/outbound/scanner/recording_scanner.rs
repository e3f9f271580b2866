use super::fixture_scanner::scan_fixture_name;
use super::wire::ScanDocument;
use crate::inventory::domain::{ScanResult, Snapshot};
use crate::ports::outbound::InventoryScanner;
use crate::shared::error::ScanError;
use std::fs;
use std::path::PathBuf;

/// RecordingInventoryScanner adapter - wraps a live scanner and saves its output
///
/// Successful results are written in the layout [`super::FixtureInventoryScanner`]
/// reads. Failing to write a recording is logged and does not fail the scan.
pub struct RecordingInventoryScanner<S> {
    inner: S,
    record_dir: PathBuf,
}

impl<S: InventoryScanner> RecordingInventoryScanner<S> {
    pub fn new(inner: S, record_dir: PathBuf) -> Self {
        Self { inner, record_dir }
    }

    fn record(&self, snapshot: &Snapshot, result: &ScanResult) -> crate::shared::Result<PathBuf> {
        fs::create_dir_all(&self.record_dir)?;
        let path = self.record_dir.join(scan_fixture_name(snapshot.origin()));
        let json = serde_json::to_string_pretty(&ScanDocument::from(result))?;
        fs::write(&path, json)?;
        Ok(path)
    }
}

impl<S: InventoryScanner> InventoryScanner for RecordingInventoryScanner<S> {
    fn scan(&self, snapshot: &Snapshot) -> Result<ScanResult, ScanError> {
        let result = self.inner.scan(snapshot)?;
        match self.record(snapshot, &result) {
            Ok(path) => tracing::info!(fixture = %path.display(), "Recorded scan fixture"),
            Err(e) => tracing::warn!(error = %e, "Failed to record scan fixture"),
        }
        Ok(result)
    }
}
