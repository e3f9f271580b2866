use crate::inventory::domain::{AggregatedInventory, Volume};
use std::fmt;

/// Volume dropped from the run, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedVolume {
    pub volume: Volume,
    pub reason: String,
}

/// Result of the per-volume snapshot/scan loop
#[derive(Debug, Default)]
pub struct VolumeScanReport {
    pub inventory: AggregatedInventory,
    pub scanned: Vec<Volume>,
    pub skipped: Vec<SkippedVolume>,
}

/// ScanOutcome - summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub scanned_volumes: Vec<Volume>,
    pub skipped_volumes: Vec<SkippedVolume>,
    pub inventory_items: usize,
    pub feed_records: usize,
    pub findings: usize,
    /// False when there were no findings and nothing was built or sent
    pub published: bool,
}

impl fmt::Display for ScanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scanned {} volume(s), skipped {}; {} inventory item(s) checked against {} known vulnerabilit{}; {} finding(s)",
            self.scanned_volumes.len(),
            self.skipped_volumes.len(),
            self.inventory_items,
            self.feed_records,
            if self.feed_records == 1 { "y" } else { "ies" },
            self.findings
        )?;
        if self.published {
            write!(f, ", payload published")
        } else {
            write!(f, ", nothing published")
        }
    }
}
