use crate::inventory::domain::{ScanResult, Snapshot};
use crate::shared::error::ScanError;

/// InventoryScanner port - runs the external inventory scanner
///
/// The scanner only ever sees `snapshot.mount_path()`; library paths in the
/// result are relative to that mount.
pub trait InventoryScanner {
    /// # Errors
    /// Returns a [`ScanError`] when the scanner cannot be started, exits
    /// non-zero, or prints output that does not parse.
    fn scan(&self, snapshot: &Snapshot) -> Result<ScanResult, ScanError>;
}

impl<T: InventoryScanner + ?Sized> InventoryScanner for Box<T> {
    fn scan(&self, snapshot: &Snapshot) -> Result<ScanResult, ScanError> {
        (**self).scan(snapshot)
    }
}
