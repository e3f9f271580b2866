use crate::inventory::domain::{Snapshot, Volume};
use crate::ports::outbound::SnapshotProvider;
use crate::shared::error::SnapshotError;
use std::path::Path;

/// PassthroughSnapshotProvider adapter for hosts without native snapshots
///
/// The "snapshot" is the live volume: mount path equals the volume root and
/// there is nothing to create or tear down.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughSnapshotProvider;

impl PassthroughSnapshotProvider {
    pub fn new() -> Self {
        Self
    }
}

impl SnapshotProvider for PassthroughSnapshotProvider {
    fn acquire(&self, volume: &Volume) -> Result<Snapshot, SnapshotError> {
        Ok(Snapshot::passthrough(volume.clone()))
    }

    fn release(&self, _snapshot: &Snapshot) -> Result<(), SnapshotError> {
        Ok(())
    }

    fn discard_partial(&self, _mount_path: &Path) -> Result<(), SnapshotError> {
        Ok(())
    }
}
