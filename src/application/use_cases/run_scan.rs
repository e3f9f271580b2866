use super::ScanVolumesUseCase;
use crate::application::dto::{ScanOutcome, ScanRequest};
use crate::inventory::services::{PathNormalizer, PayloadBuilder, ReconciliationEngine, UploadPayload};
use crate::ports::outbound::{
    FindingsPublisher, InventoryScanner, ProgressReporter, SnapshotProvider, VulnerabilityFeed,
};
use crate::shared::error::PublishError;
use crate::shared::Result;
use anyhow::Context;
use std::io::Write;

/// RunScanUseCase - the whole scan and reconciliation pipeline
///
/// Order of work:
/// 1. fetch the complete vulnerability feed (fatal on failure)
/// 2. snapshot and scan every volume (volume failures are skipped)
/// 3. reconcile the aggregated inventory against the feed
/// 4. when there is at least one finding, build the payload, stage it in a
///    temporary file, publish it, and remove the file
///
/// # Type Parameters
/// * `SP` - SnapshotProvider implementation
/// * `SC` - InventoryScanner implementation
/// * `VF` - VulnerabilityFeed implementation
/// * `FP` - FindingsPublisher implementation
/// * `PR` - ProgressReporter implementation
pub struct RunScanUseCase<SP, SC, VF, FP, PR> {
    volume_scan: ScanVolumesUseCase<SP, SC, PR>,
    feed: VF,
    publisher: FP,
}

impl<SP, SC, VF, FP, PR> RunScanUseCase<SP, SC, VF, FP, PR>
where
    SP: SnapshotProvider,
    SC: InventoryScanner,
    VF: VulnerabilityFeed,
    FP: FindingsPublisher,
    PR: ProgressReporter,
{
    pub fn new(
        snapshot_provider: SP,
        scanner: SC,
        feed: VF,
        publisher: FP,
        progress_reporter: PR,
    ) -> Self {
        Self {
            volume_scan: ScanVolumesUseCase::new(snapshot_provider, scanner, progress_reporter),
            feed,
            publisher,
        }
    }

    /// Executes one run
    ///
    /// # Errors
    /// Feed, reconciliation and publish failures abort the run. Snapshot and
    /// scanner failures never do.
    pub fn execute(&self, request: ScanRequest) -> Result<ScanOutcome> {
        let progress = self.volume_scan.progress_reporter();

        progress.report("🔎 Fetching known vulnerabilities...");
        let records = self.feed.fetch_all(&request.resource_id).with_context(|| {
            format!(
                "Failed to fetch the vulnerability feed for resource {}",
                request.resource_id
            )
        })?;
        progress.report(&format!("✅ {} known vulnerabilit(ies) retrieved", records.len()));

        progress.report(&format!("💽 Scanning {} volume(s)...", request.volumes.len()));
        let normalizer = PathNormalizer::new(request.separator_style);
        let volume_report = self.volume_scan.execute(&request.volumes, &normalizer);

        let engine = ReconciliationEngine::new(request.version_matching);
        let asset = engine
            .reconcile(&volume_report.inventory, &records)
            .context("Reconciliation rejected the vulnerability feed")?;
        tracing::info!(
            items = volume_report.inventory.len(),
            records = records.len(),
            findings = asset.findings().len(),
            "Reconciliation complete"
        );

        let mut outcome = ScanOutcome {
            scanned_volumes: volume_report.scanned,
            skipped_volumes: volume_report.skipped,
            inventory_items: volume_report.inventory.len(),
            feed_records: records.len(),
            findings: asset.findings().len(),
            published: false,
        };

        if asset.is_empty() {
            progress.report_completion("✅ No vulnerabilities found; nothing to publish");
            return Ok(outcome);
        }

        let builder = PayloadBuilder::new(request.integration_id, request.asset_identifier.clone());
        let payload = builder.build(asset, &request.subscription_id);
        self.stage_and_publish(&payload)
            .context("Failed to publish vulnerability findings")?;
        outcome.published = true;

        progress.report_completion(&format!(
            "📤 Published {} finding(s)",
            payload.finding_count()
        ));
        Ok(outcome)
    }

    /// Writes the payload to a temporary file and hands it to the publisher.
    ///
    /// The file is deleted before this returns on every path.
    fn stage_and_publish(&self, payload: &UploadPayload) -> std::result::Result<(), PublishError> {
        let json = payload.to_json()?;

        let mut staged = tempfile::Builder::new()
            .prefix("hostvuln-findings-")
            .suffix(".json")
            .tempfile()
            .map_err(PublishError::Staging)?;
        staged
            .write_all(json.as_bytes())
            .and_then(|_| staged.flush())
            .map_err(PublishError::Staging)?;
        tracing::debug!(path = %staged.path().display(), bytes = json.len(), "Payload staged");

        let published = self.publisher.publish(staged.path());

        let staged_path = staged.path().to_path_buf();
        if let Err(e) = staged.close() {
            tracing::warn!(path = %staged_path.display(), error = %e, "Failed to remove staged payload");
        }
        published
    }
}
