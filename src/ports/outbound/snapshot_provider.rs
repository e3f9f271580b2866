use crate::inventory::domain::{Snapshot, Volume};
use crate::shared::error::SnapshotError;
use std::path::Path;

/// SnapshotProvider port - acquires and releases a stable view of a volume
///
/// Implementations either create a real point-in-time snapshot or hand back
/// the volume itself. Which one runs is decided once, at construction time.
pub trait SnapshotProvider {
    /// Creates a snapshot of `volume` and mounts it somewhere readable.
    ///
    /// # Errors
    /// Returns [`SnapshotError::Create`]; if a mount link was already created
    /// it is reported through [`SnapshotError::partial_mount`].
    fn acquire(&self, volume: &Volume) -> Result<Snapshot, SnapshotError>;

    /// Unmounts and destroys a snapshot returned by [`acquire`](Self::acquire).
    fn release(&self, snapshot: &Snapshot) -> Result<(), SnapshotError>;

    /// Best-effort removal of a mount left behind by a failed acquire.
    fn discard_partial(&self, mount_path: &Path) -> Result<(), SnapshotError>;
}

impl<T: SnapshotProvider + ?Sized> SnapshotProvider for Box<T> {
    fn acquire(&self, volume: &Volume) -> Result<Snapshot, SnapshotError> {
        (**self).acquire(volume)
    }

    fn release(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        (**self).release(snapshot)
    }

    fn discard_partial(&self, mount_path: &Path) -> Result<(), SnapshotError> {
        (**self).discard_partial(mount_path)
    }
}
