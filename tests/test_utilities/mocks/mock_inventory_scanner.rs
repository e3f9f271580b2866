use hostvuln::prelude::*;
use std::result::Result;
use hostvuln::shared::error::ScanError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock InventoryScanner returning canned results per volume root
///
/// A root with no canned result scans as empty; roots registered with
/// `failing_on` exit non-zero.
#[derive(Default, Clone)]
pub struct MockInventoryScanner {
    results: HashMap<String, ScanResult>,
    failing: Vec<String>,
    pub scanned: Arc<Mutex<Vec<String>>>,
}

impl MockInventoryScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, root: &str, result: ScanResult) -> Self {
        self.results.insert(root.to_string(), result);
        self
    }

    pub fn failing_on(mut self, root: &str) -> Self {
        self.failing.push(root.to_string());
        self
    }

    pub fn scanned(&self) -> Vec<String> {
        self.scanned.lock().unwrap().clone()
    }
}

impl InventoryScanner for MockInventoryScanner {
    fn scan(&self, snapshot: &Snapshot) -> Result<ScanResult, ScanError> {
        let root = snapshot.origin().root().to_string();
        self.scanned.lock().unwrap().push(root.clone());

        if self.failing.contains(&root) {
            return Err(ScanError::NonZeroExit {
                mount_path: snapshot.mount_path().to_path_buf(),
                status: "exit status: 1".to_string(),
                stderr: "access denied".to_string(),
            });
        }

        Ok(self.results.get(&root).cloned().unwrap_or_default())
    }
}
