use hostvuln::prelude::*;
use std::result::Result;
use hostvuln::shared::error::SnapshotError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock SnapshotProvider that mounts every volume at its own root
///
/// Volumes registered with `failing_on` fail to acquire; `leaving_partial`
/// additionally reports a half-created mount that must be discarded.
#[derive(Default, Clone)]
pub struct MockSnapshotProvider {
    failing: HashSet<String>,
    partial: bool,
    pub events: Arc<Mutex<Vec<String>>>,
}

impl MockSnapshotProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, root: &str) -> Self {
        self.failing.insert(root.to_string());
        self
    }

    pub fn leaving_partial(mut self) -> Self {
        self.partial = true;
        self
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl SnapshotProvider for MockSnapshotProvider {
    fn acquire(&self, volume: &Volume) -> Result<Snapshot, SnapshotError> {
        if self.failing.contains(volume.root()) {
            self.record(format!("acquire-failed {}", volume.root()));
            return Err(SnapshotError::Create {
                volume: volume.as_path().to_path_buf(),
                partial_mount: self
                    .partial
                    .then(|| PathBuf::from(format!("/mnt/partial-{}", volume.key()))),
                details: "snapshot service unavailable".to_string(),
            });
        }

        self.record(format!("acquire {}", volume.root()));
        Ok(Snapshot::new(
            volume.clone(),
            volume.as_path().to_path_buf(),
            Some(format!("shadow-{}", volume.key())),
        ))
    }

    fn release(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        self.record(format!("release {}", snapshot.origin().root()));
        Ok(())
    }

    fn discard_partial(&self, mount_path: &Path) -> Result<(), SnapshotError> {
        self.record(format!("discard {}", mount_path.display()));
        Ok(())
    }
}
