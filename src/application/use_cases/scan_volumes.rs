use crate::application::dto::{SkippedVolume, VolumeScanReport};
use crate::inventory::domain::{InventoryItem, Snapshot, Volume};
use crate::inventory::services::PathNormalizer;
use crate::ports::outbound::{InventoryScanner, ProgressReporter, SnapshotProvider};
use crate::shared::error::{ScanError, SnapshotError};
use thiserror::Error;

/// Why a single volume dropped out of the run
#[derive(Debug, Error)]
enum VolumeFailure {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Releases a snapshot when it goes out of scope, whatever happened to the scan
struct SnapshotGuard<'a, SP: SnapshotProvider> {
    provider: &'a SP,
    snapshot: Snapshot,
}

impl<SP: SnapshotProvider> Drop for SnapshotGuard<'_, SP> {
    fn drop(&mut self) {
        match self.provider.release(&self.snapshot) {
            Ok(()) => tracing::debug!(mount_path = %self.snapshot.mount_path().display(), "Snapshot released"),
            Err(e) => tracing::error!(error = %e, "Failed to release snapshot"),
        }
    }
}

/// ScanVolumesUseCase - the strictly sequential snapshot/scan loop
///
/// For each volume: acquire a snapshot, scan its mount, release it, and
/// re-root the results at the volume. A volume whose snapshot or scan fails is
/// logged, reported and left out; the rest of the run is unaffected.
///
/// # Type Parameters
/// * `SP` - SnapshotProvider implementation
/// * `SC` - InventoryScanner implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanVolumesUseCase<SP, SC, PR> {
    snapshot_provider: SP,
    scanner: SC,
    progress_reporter: PR,
}

impl<SP, SC, PR> ScanVolumesUseCase<SP, SC, PR>
where
    SP: SnapshotProvider,
    SC: InventoryScanner,
    PR: ProgressReporter,
{
    pub fn new(snapshot_provider: SP, scanner: SC, progress_reporter: PR) -> Self {
        Self {
            snapshot_provider,
            scanner,
            progress_reporter,
        }
    }

    pub fn progress_reporter(&self) -> &PR {
        &self.progress_reporter
    }

    /// Scans `volumes` one at a time, in order.
    pub fn execute(&self, volumes: &[Volume], normalizer: &PathNormalizer) -> VolumeScanReport {
        let mut report = VolumeScanReport::default();
        let total = volumes.len();

        for (index, volume) in volumes.iter().enumerate() {
            self.progress_reporter
                .report_progress(index, total, Some(volume.root()));
            let span = tracing::info_span!("volume", root = %volume);
            let _entered = span.enter();

            match self.scan_volume(volume, normalizer) {
                Ok(items) => {
                    tracing::info!(items = items.len(), "Volume scanned");
                    report.inventory.append(items);
                    report.scanned.push(volume.clone());
                }
                Err(failure) => {
                    tracing::error!(error = %failure, "Skipping volume");
                    self.progress_reporter
                        .report_error(&format!("Skipping volume {}: {}", volume, failure));
                    report.skipped.push(SkippedVolume {
                        volume: volume.clone(),
                        reason: failure.to_string(),
                    });
                }
            }
        }
        self.progress_reporter.report_progress(total, total, None);

        report
    }

    fn scan_volume(
        &self,
        volume: &Volume,
        normalizer: &PathNormalizer,
    ) -> Result<Vec<InventoryItem>, VolumeFailure> {
        let snapshot = match self.snapshot_provider.acquire(volume) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.discard_partial(&e);
                return Err(e.into());
            }
        };
        tracing::info!(
            mount_path = %snapshot.mount_path().display(),
            snapshot_id = snapshot.snapshot_id().unwrap_or("none"),
            passthrough = snapshot.is_passthrough(),
            "Snapshot acquired"
        );

        let guard = SnapshotGuard {
            provider: &self.snapshot_provider,
            snapshot,
        };
        let scan_result = self.scanner.scan(&guard.snapshot);
        drop(guard);

        let scan_result = scan_result?;
        tracing::debug!(items = scan_result.item_count(), "Scanner finished");
        Ok(normalizer.normalize(scan_result, volume))
    }

    fn discard_partial(&self, error: &SnapshotError) {
        if let Some(mount_path) = error.partial_mount() {
            if let Err(e) = self.snapshot_provider.discard_partial(mount_path) {
                tracing::warn!(error = %e, "Failed to remove partial snapshot mount");
            }
        }
    }
}
